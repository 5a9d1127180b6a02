//! Property tests: decisions hold for every suspension point shape.

use awaitguard_analysis::rules::configure_await::*;
use awaitguard_analysis::rules::Diagnostic;
use awaitguard_core::traits::CancellationToken;
use awaitguard_core::types::SourceSpan;
use proptest::prelude::*;

const RECEIVERS: &[&str] = &[
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.Task`1",
    "System.Threading.Tasks.ValueTask`1",
    "Orders.Repository",
];

const RESULT_TYPES: &[&str] = &[
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.Task`1<System.Int32>",
    "System.Runtime.CompilerServices.YieldAwaitable",
    "System.Runtime.CompilerServices.ConfiguredTaskAwaitable",
];

const METHODS: &[&str] = &["ConfigureAwait", "SaveAsync", "Yield", "Delay"];

fn arb_span() -> impl Strategy<Value = SourceSpan> {
    (1u32..500, 1u32..120)
        .prop_map(|(line, col)| SourceSpan::on_line("src/Unit.cs", line, col, col + 10))
}

fn arb_type() -> impl Strategy<Value = Option<TypeSymbol>> {
    proptest::option::of(proptest::sample::select(RESULT_TYPES).prop_map(TypeSymbol::new))
}

fn arb_method() -> impl Strategy<Value = MethodSymbol> {
    (
        proptest::sample::select(METHODS),
        proptest::option::of(proptest::sample::select(RECEIVERS).prop_map(TypeSymbol::new)),
    )
        .prop_map(|(name, receiver)| MethodSymbol::new(name, receiver))
}

fn arb_kind() -> impl Strategy<Value = OperationKind> {
    prop_oneof![Just(OperationKind::Invocation), arb_value_kind()]
}

fn arb_value_kind() -> impl Strategy<Value = OperationKind> {
    prop_oneof![
        Just(OperationKind::PropertyReference),
        Just(OperationKind::FieldReference),
        Just(OperationKind::LocalReference),
        Just(OperationKind::ParameterReference),
        Just(OperationKind::Other),
    ]
}

fn arb_point() -> impl Strategy<Value = SuspensionPoint> {
    prop_oneof![
        (arb_span(), arb_method(), arb_type())
            .prop_map(|(span, method, ty)| SuspensionPoint::awaiting_call(span, method, ty)),
        (arb_span(), arb_kind(), arb_type())
            .prop_map(|(span, kind, ty)| SuspensionPoint::awaiting_value(span, kind, ty)),
        arb_span().prop_map(SuspensionPoint::unbound),
    ]
}

/// `ConfigureAwait` on a framework task type, or any call returning `YieldAwaitable`.
fn arb_exempt_point() -> impl Strategy<Value = SuspensionPoint> {
    prop_oneof![
        (arb_span(), proptest::sample::select(&RECEIVERS[..3]), arb_type()).prop_map(
            |(span, receiver, ty)| {
                SuspensionPoint::awaiting_call(
                    span,
                    MethodSymbol::new("ConfigureAwait", Some(TypeSymbol::new(receiver))),
                    ty,
                )
            }
        ),
        (arb_span(), arb_method()).prop_map(|(span, method)| {
            SuspensionPoint::awaiting_call(
                span,
                method,
                Some(TypeSymbol::new("System.Runtime.CompilerServices.YieldAwaitable")),
            )
        }),
    ]
}

fn arb_compilation() -> impl Strategy<Value = CompilationInfo> {
    prop_oneof![
        Just(CompilationInfo::new("Unit").with_attribute("UseConfigureAwaitFalseAttribute")),
        arb_inactive_compilation(),
    ]
}

/// Compilations whose policy is anything but enforcement.
fn arb_inactive_compilation() -> impl Strategy<Value = CompilationInfo> {
    prop_oneof![
        Just(CompilationInfo::new("Unit")),
        Just(CompilationInfo::new("Unit").with_attribute("DoNotUseConfigureAwaitAttribute")),
        Just(
            CompilationInfo::new("Unit")
                .with_attribute("UseConfigureAwaitFalseAttribute")
                .with_attribute("DoNotUseConfigureAwaitAttribute")
        ),
        Just(CompilationInfo::new("Unit").with_unbound_attribute()),
    ]
}

fn analyze(compilation: &CompilationInfo, points: &[SuspensionPoint]) -> Vec<Diagnostic> {
    let mut sink: Vec<Diagnostic> = Vec::new();
    ConfigureAwaitRule::default().analyze(
        compilation,
        points,
        &WellKnownSymbols::new(),
        &CancellationToken::new(),
        &mut sink,
    );
    sink
}

proptest! {
    #[test]
    fn non_enforcing_policy_never_emits(
        compilation in arb_inactive_compilation(),
        points in proptest::collection::vec(arb_point(), 0..32),
    ) {
        prop_assert!(!resolve_declared(&compilation).is_enforcing());
        prop_assert!(analyze(&compilation, &points).is_empty());
    }

    #[test]
    fn exempt_points_never_emit(
        compilation in arb_compilation(),
        point in arb_exempt_point(),
    ) {
        let info = SuspensionPointClassifier::new(&WellKnownSymbols::new()).classify(&point);
        prop_assert!(is_excluded(&info));
        prop_assert!(analyze(&compilation, std::slice::from_ref(&point)).is_empty());
    }

    #[test]
    fn points_without_invocation_emit_exactly_once(
        span in arb_span(),
        kind in arb_value_kind(),
        ty in arb_type(),
    ) {
        let point = SuspensionPoint::awaiting_value(span.clone(), kind, ty);
        let compilation =
            CompilationInfo::new("Unit").with_attribute("UseConfigureAwaitFalseAttribute");
        let diagnostics = analyze(&compilation, &[point]);
        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(&diagnostics[0].location, &span);
    }

    #[test]
    fn each_point_gets_at_most_one_diagnostic(
        points in proptest::collection::vec(arb_point(), 0..32),
    ) {
        let compilation =
            CompilationInfo::new("Unit").with_attribute("UseConfigureAwaitFalseAttribute");
        let diagnostics = analyze(&compilation, &points);
        let expected = points
            .iter()
            .filter(|p| {
                let info = SuspensionPointClassifier::new(&WellKnownSymbols::new()).classify(p);
                !is_excluded(&info)
            })
            .count();
        prop_assert_eq!(diagnostics.len(), expected);
    }

    #[test]
    fn analysis_is_idempotent(
        compilation in arb_compilation(),
        points in proptest::collection::vec(arb_point(), 0..32),
    ) {
        let rule = ConfigureAwaitRule::default();
        let symbols = WellKnownSymbols::new();
        let token = CancellationToken::new();
        let mut first: Vec<Diagnostic> = Vec::new();
        let mut second: Vec<Diagnostic> = Vec::new();
        rule.analyze(&compilation, &points, &symbols, &token, &mut first);
        rule.analyze(&compilation, &points, &symbols, &token, &mut second);
        let (parallel, _) = rule.analyze_parallel(&compilation, &points, &symbols, &token);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);
    }
}
