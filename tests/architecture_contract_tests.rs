//! Architecture contract tests.

mod support;

use support::architecture::{find_imports, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_imports(
        "src/domain",
        &[
            "crate::adapter",
            "crate::app",
            "crate::port",
            "tokio::",
            "alloy_provider",
            "tracing::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_imports("src/port", &["crate::adapter", "crate::app", "alloy_provider"]);

    assert!(
        hits.is_empty(),
        "found outer layer imports in ports: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_imports("src/app", &["crate::adapter", "alloy_provider", "alloy_signer"]);

    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn network_stack_lives_in_rpc_adapter() {
    let hits = find_imports("src", &["alloy_provider::", "alloy_signer_local::"]);
    let outside: Vec<_> = hits
        .into_iter()
        .filter(|(path, _, _)| !path.starts_with("src/adapter/outbound/rpc/"))
        .collect();

    assert!(
        outside.is_empty(),
        "alloy provider and signer should only be used by the rpc adapter: {outside:#?}"
    );
}

#[test]
fn wallet_contract_lives_in_outbound_port() {
    assert!(
        path_exists("src/port/outbound/wallet.rs"),
        "wallet provider trait should live under port/outbound"
    );
    assert!(
        path_exists("src/port/outbound/chain.rs"),
        "chain reader trait should live under port/outbound"
    );
}
