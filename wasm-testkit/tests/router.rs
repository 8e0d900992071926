use rstest::rstest;
use serde_json::{json, Value};
use wasm_core_types::{AbsoluteTxPosition, CodeId, ContractCodeHistoryOperationType};
use wasm_primitives::AddressCodec;
use wasm_query::config::WasmConfig;
use wasm_query::error::QueryError;
use wasm_query::router::QueryRouter;
use wasm_testkit::context::MockQueryContext;
use wasm_testkit::fixtures::code::{code_hash, CodeConfig};
use wasm_testkit::fixtures::contract::{ContractInfoConfig, HistoryEntryConfig};
use wasm_testkit::utils::dummies::{dummy_bech32, dummy_codec, dummy_contract_address};
use wasm_testkit::vm::{MockVm, MockVmBehavior};

fn populated_context() -> MockQueryContext {
    MockQueryContext::new()
        .with_code(CodeId::new(1), CodeConfig::builder().build())
        .with_code(
            CodeId::new(2),
            CodeConfig::builder().byte_code(b"\0asm-two".to_vec()).build(),
        )
        .with_contract(
            dummy_contract_address(1),
            ContractInfoConfig::builder()
                .created(Some(AbsoluteTxPosition::new(5, 0)))
                .build(),
        )
        .with_contract(
            dummy_contract_address(2),
            ContractInfoConfig::builder()
                .code_id(CodeId::new(2))
                .build(),
        )
        .with_contract(
            dummy_contract_address(3),
            ContractInfoConfig::builder()
                .created(Some(AbsoluteTxPosition::new(2, 1)))
                .build(),
        )
        .with_history_entry(dummy_contract_address(1), HistoryEntryConfig::builder().build())
        .with_history_entry(
            dummy_contract_address(1),
            HistoryEntryConfig::builder()
                .operation(ContractCodeHistoryOperationType::Migrate)
                .code_id(CodeId::new(2))
                .updated(Some(AbsoluteTxPosition::new(9, 3)))
                .build(),
        )
        .with_state(dummy_contract_address(1), b"count".to_vec(), b"7".to_vec())
        .with_state(dummy_contract_address(1), b"admin".to_vec(), b"me".to_vec())
        .with_inactive(dummy_contract_address(3))
}

fn route(
    ctx: &MockQueryContext,
    path: &[&str],
    data: &[u8],
) -> Result<Vec<u8>, QueryError> {
    let codec = dummy_codec();
    let config = WasmConfig::default();
    QueryRouter::new(&codec, &config).route(ctx, path, data)
}

fn route_json(ctx: &MockQueryContext, path: &[&str]) -> Value {
    let bytes = route(ctx, path, &[]).expect("query succeeds");
    serde_json::from_slice(&bytes).expect("valid JSON")
}

#[test_log::test]
fn contract_history_never_exposes_update_position() {
    let ctx = populated_context();
    let history = route_json(&ctx, &["contract-history", &dummy_bech32(1)]);

    assert_eq!(
        history,
        json!([
            { "operation": "Init", "code_id": 1, "msg": { "init": {} } },
            { "operation": "Migrate", "code_id": 2, "msg": { "init": {} } }
        ])
    );
}

#[test_log::test]
fn contract_history_of_unknown_contract_is_empty_list() {
    let ctx = populated_context();
    assert_eq!(route_json(&ctx, &["contract-history", &dummy_bech32(9)]), json!([]));
}

#[test_log::test]
fn invalid_smart_query_never_reaches_vm() {
    let ctx = populated_context();

    let err = route(&ctx, &["contract-state", &dummy_bech32(1), "smart"], b"{}").unwrap_err();

    assert!(matches!(err, QueryError::ValidationFailure(_)));
    assert_eq!((err.codespace(), err.code()), ("wasm", 14));
    assert_eq!(ctx.vm().invocation_count(), 0);
    assert_eq!(ctx.store_reads(), 0);
}

#[rstest]
#[test_log::test]
#[case(b"".as_slice())]
#[case(b"[]".as_slice())]
#[case(b"not json".as_slice())]
fn malformed_smart_query_bodies_are_rejected(#[case] body: &[u8]) {
    let ctx = populated_context();

    assert!(matches!(
        route(&ctx, &["contract-state", &dummy_bech32(1), "smart"], body),
        Err(QueryError::ValidationFailure(_))
    ));
    assert_eq!(ctx.vm().invocation_count(), 0);
}

#[test_log::test]
fn valid_smart_query_reaches_vm_once() {
    let ctx = populated_context();
    let body = br#"{"get_count":{}}"#;

    let result = route(&ctx, &["contract-state", &dummy_bech32(1), "smart"], body).unwrap();

    assert_eq!(result, body.to_vec());
    let invocations = ctx.vm().invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].contract, dummy_contract_address(1));
    assert_eq!(invocations[0].code_hash, code_hash(b"\0asm\x01\0\0\0"));
    assert_eq!(
        invocations[0].gas_limit,
        WasmConfig::default().smart_query_gas_limit
    );
}

#[test_log::test]
fn smart_query_result_is_returned_verbatim() {
    let ctx = populated_context().with_vm(MockVm::new(MockVmBehavior::Respond(vec![0xff, 0x00])));

    let result = route(&ctx, &["contract-state", &dummy_bech32(1), "smart"], br#"{"a":1}"#).unwrap();
    assert_eq!(result, vec![0xff, 0x00]);
}

#[test_log::test]
fn gas_exhaustion_is_distinct_from_contract_failure() {
    let exhausted = populated_context().with_vm(MockVm::new(MockVmBehavior::ExhaustGas).with_query_cost(100_000));
    let err = route(&exhausted, &["contract-state", &dummy_bech32(1), "smart"], br#"{"loop":{}}"#)
        .unwrap_err();
    assert!(matches!(err, QueryError::OutOfGas(_)));
    assert_eq!((err.codespace(), err.code()), ("sdk", 11));

    let failing = populated_context().with_vm(MockVm::new(MockVmBehavior::Fail("boom".into())));
    let err = route(&failing, &["contract-state", &dummy_bech32(1), "smart"], br#"{"fail":{}}"#)
        .unwrap_err();
    assert!(matches!(err, QueryError::VmExecution(_)));
    assert!(err.to_string().contains("boom"));
}

#[test_log::test]
fn each_smart_query_gets_a_fresh_meter() {
    let ctx = populated_context().with_vm(MockVm::new(MockVmBehavior::Echo).with_query_cost(2_000_000));
    let contract = dummy_bech32(1);
    let path = ["contract-state", contract.as_str(), "smart"];

    // a shared meter would run out on the second call
    assert!(route(&ctx, &path, br#"{"a":1}"#).is_ok());
    assert!(route(&ctx, &path, br#"{"a":1}"#).is_ok());
    assert_eq!(ctx.vm().invocation_count(), 2);
}

#[test_log::test]
fn contracts_by_code_match_store_contents() {
    let ctx = populated_context();

    // ordered by creation position
    assert_eq!(
        route_json(&ctx, &["list-contracts-by-code", "1"]),
        json!([dummy_bech32(3), dummy_bech32(1)])
    );
    assert_eq!(
        route_json(&ctx, &["list-contracts-by-code", "2"]),
        json!([dummy_bech32(2)])
    );
    assert!(route(&ctx, &["list-contracts-by-code", "3"], &[]).unwrap().is_empty());
}

#[test_log::test]
fn invalid_address_fails_without_store_access() {
    let ctx = populated_context();

    match route(&ctx, &["inactive-contract", "not-a-valid-address"], &[]) {
        Err(err @ QueryError::InvalidAddress { .. }) => {
            assert_eq!((err.codespace(), err.code()), ("sdk", 7));
            assert!(err.to_string().contains("not-a-valid-address"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(ctx.store_reads(), 0);
}

#[test_log::test]
fn address_with_other_prefix_is_invalid() {
    let ctx = populated_context();
    let other = AddressCodec::new("cosmos")
        .unwrap()
        .from_bytes(vec![1; 32])
        .unwrap()
        .to_string();

    assert!(matches!(
        route(&ctx, &["contract-info", &other], &[]),
        Err(QueryError::InvalidAddress { .. })
    ));
}

#[rstest]
#[test_log::test]
#[case(&["no-such-kind"])]
#[case(&["contract-state", "x"])]
#[case(&["contract-info"])]
fn unknown_requests(#[case] path: &[&str]) {
    let ctx = populated_context();
    let err = route(&ctx, path, &[]).unwrap_err();

    assert!(matches!(err, QueryError::UnknownRequest { .. }));
    assert_eq!((err.codespace(), err.code()), ("sdk", 6));
    assert_eq!(ctx.store_reads(), 0);
}

#[test_log::test]
fn unknown_state_method() {
    let ctx = populated_context();

    assert!(matches!(
        route(&ctx, &["contract-state", &dummy_bech32(1), "dump"], &[]),
        Err(QueryError::UnknownRequest { .. })
    ));
    assert_eq!(ctx.store_reads(), 0);
}

#[test_log::test]
fn contract_info_is_redacted() {
    let ctx = populated_context();
    let info = route_json(&ctx, &["contract-info", &dummy_bech32(1)]);

    assert_eq!(info["address"], dummy_bech32(1));
    assert_eq!(info["code_id"], 1);
    assert_eq!(info["label"], "contract");
    assert!(info.get("created").is_none());
}

#[test_log::test]
fn missing_records_answer_no_content() {
    let ctx = populated_context();

    assert!(route(&ctx, &["contract-info", &dummy_bech32(9)], &[]).unwrap().is_empty());
    assert!(route(&ctx, &["code", "0"], &[]).unwrap().is_empty());
    assert!(route(&ctx, &["code", "77"], &[]).unwrap().is_empty());
    assert!(route(&MockQueryContext::new(), &["list-code"], &[]).unwrap().is_empty());
    assert!(route(&MockQueryContext::new(), &["inactive-contracts"], &[]).unwrap().is_empty());
}

#[test_log::test]
fn code_queries() {
    let ctx = populated_context();

    let code = route_json(&ctx, &["code", "2"]);
    assert_eq!(code["id"], 2);
    assert_eq!(code["instantiate_permission"], json!({ "permission": "Everybody" }));
    assert_eq!(code["data"], "AGFzbS10d28=");

    let codes = route_json(&ctx, &["list-code"]);
    let ids: Vec<u64> = codes
        .as_array()
        .unwrap()
        .iter()
        .map(|code| code["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(codes[0].get("data").is_none());
}

#[test_log::test]
fn code_query_reads_code_info_once() {
    let ctx = populated_context();

    route(&ctx, &["code", "1"], &[]).unwrap();
    assert_eq!(ctx.store_reads(), 1);
}

#[test_log::test]
fn code_id_must_be_decimal() {
    let ctx = populated_context();

    match route(&ctx, &["code", "0x01"], &[]) {
        Err(QueryError::InvalidArgument { value, .. }) => assert_eq!(value, "0x01"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test_log::test]
fn inactive_contract_queries() {
    let ctx = populated_context();

    assert_eq!(route_json(&ctx, &["inactive-contracts"]), json!([dummy_bech32(3)]));
    assert_eq!(route_json(&ctx, &["inactive-contract", &dummy_bech32(3)]), json!(true));
    assert_eq!(route_json(&ctx, &["inactive-contract", &dummy_bech32(1)]), json!(false));
}

#[test_log::test]
fn raw_and_all_state_queries() {
    let ctx = populated_context();
    let contract = dummy_bech32(1);

    assert_eq!(
        route(&ctx, &["contract-state", &contract, "raw"], b"count").unwrap(),
        b"7".to_vec()
    );
    assert!(route(&ctx, &["contract-state", &contract, "raw"], b"missing")
        .unwrap()
        .is_empty());

    let all = route(&ctx, &["contract-state", &contract, "all"], &[]).unwrap();
    assert_eq!(
        String::from_utf8(all).unwrap(),
        r#"[{"key":"61646D696E","value":"bWU="},{"key":"636F756E74","value":"Nw=="}]"#
    );

    let empty = route(&ctx, &["contract-state", &dummy_bech32(9), "all"], &[]).unwrap();
    assert_eq!(empty, b"[]".to_vec());
    assert_eq!(ctx.vm().invocation_count(), 0);
}
