//! Client for the operations resource.
//!
//! # Design
//! Four read endpoints (single operation, receipt, filtered list, grouped
//! summary) and seven creation endpoints, one per [`OperationType`]. The
//! creation methods exist per kind for call-site clarity and once more as
//! [`OperationsClient::make_operation`], which routes a tagged
//! [`MakeOperationRequest`] to the endpoint of its kind.
//!
//! Nothing is validated client side. A payload with an empty `accountId` is
//! sent as-is and the gateway's status decides the outcome.

use crate::clients::decode;
use crate::error::GatewayError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::{query_pairs, Transport};
use crate::types::operations::{
    GetOperationReceiptResponse, GetOperationResponse, GetOperationsQuery, GetOperationsResponse,
    GetOperationsSummaryQuery, GetOperationsSummaryResponse, MakeBillPaymentOperationRequest,
    MakeCashWithdrawalOperationRequest, MakeCashbackOperationRequest, MakeFeeOperationRequest,
    MakeOperationRequest, MakeOperationResponse, MakePurchaseOperationRequest, MakeTopUpOperationRequest,
    MakeTransferOperationRequest, OperationType,
};

/// Prefix of `GET /api/v1/operations/{operationId}`.
pub const GET_OPERATION: Endpoint = Endpoint::get("/api/v1/operations");
/// Prefix of `GET /api/v1/operations/operation-receipt/{operationId}`.
pub const GET_OPERATION_RECEIPT: Endpoint = Endpoint::get("/api/v1/operations/operation-receipt");
pub const GET_OPERATIONS: Endpoint = Endpoint::get("/api/v1/operations");
pub const GET_OPERATIONS_SUMMARY: Endpoint = Endpoint::get("/api/v1/operations/operations-summary");

pub const MAKE_FEE_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-fee-operation");
pub const MAKE_TOP_UP_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-top-up-operation");
pub const MAKE_CASHBACK_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-cashback-operation");
pub const MAKE_TRANSFER_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-transfer-operation");
pub const MAKE_PURCHASE_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-purchase-operation");
pub const MAKE_BILL_PAYMENT_OPERATION: Endpoint = Endpoint::post("/api/v1/operations/make-bill-payment-operation");
pub const MAKE_CASH_WITHDRAWAL_OPERATION: Endpoint =
    Endpoint::post("/api/v1/operations/make-cash-withdrawal-operation");

/// The creation endpoint for an operation kind.
pub fn make_operation_endpoint(kind: OperationType) -> Endpoint {
    match kind {
        OperationType::Fee => MAKE_FEE_OPERATION,
        OperationType::TopUp => MAKE_TOP_UP_OPERATION,
        OperationType::Cashback => MAKE_CASHBACK_OPERATION,
        OperationType::Transfer => MAKE_TRANSFER_OPERATION,
        OperationType::Purchase => MAKE_PURCHASE_OPERATION,
        OperationType::BillPayment => MAKE_BILL_PAYMENT_OPERATION,
        OperationType::CashWithdrawal => MAKE_CASH_WITHDRAWAL_OPERATION,
    }
}

/// Builder, low-level and high-level creation methods for one kind each.
macro_rules! per_kind_methods {
    ($($endpoint:ident, $request:ty => $build:ident, $api:ident, $decoded:ident;)*) => {
        $(
            pub fn $build(&self, request: &$request) -> Result<HttpRequest, GatewayError> {
                self.transport.post_json($endpoint.path, request)
            }

            pub fn $api(&self, request: &$request) -> Result<HttpResponse, GatewayError> {
                self.transport.execute(self.$build(request)?)
            }

            pub fn $decoded(&self, request: &$request) -> Result<MakeOperationResponse, GatewayError> {
                decode(self.$api(request)?)
            }
        )*
    };
}

#[derive(Debug, Clone)]
pub struct OperationsClient {
    transport: Transport,
}

impl OperationsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn build_get_operation(&self, operation_id: &str) -> HttpRequest {
        self.transport.get(&GET_OPERATION.with_segment(operation_id), Vec::new())
    }

    pub fn get_operation_api(&self, operation_id: &str) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_operation(operation_id))
    }

    pub fn get_operation(&self, operation_id: &str) -> Result<GetOperationResponse, GatewayError> {
        decode(self.get_operation_api(operation_id)?)
    }

    pub fn build_get_operation_receipt(&self, operation_id: &str) -> HttpRequest {
        self.transport
            .get(&GET_OPERATION_RECEIPT.with_segment(operation_id), Vec::new())
    }

    pub fn get_operation_receipt_api(&self, operation_id: &str) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_operation_receipt(operation_id))
    }

    /// Fetch the receipt of an operation. An unknown id surfaces as
    /// `GatewayError::Status` with the gateway's 404.
    pub fn get_operation_receipt(&self, operation_id: &str) -> Result<GetOperationReceiptResponse, GatewayError> {
        decode(self.get_operation_receipt_api(operation_id)?)
    }

    pub fn build_get_operations(&self, query: &GetOperationsQuery) -> Result<HttpRequest, GatewayError> {
        Ok(self.transport.get(GET_OPERATIONS.path, query_pairs(query)?))
    }

    pub fn get_operations_api(&self, query: &GetOperationsQuery) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_operations(query)?)
    }

    pub fn get_operations(&self, query: &GetOperationsQuery) -> Result<GetOperationsResponse, GatewayError> {
        decode(self.get_operations_api(query)?)
    }

    pub fn build_get_operations_summary(&self, query: &GetOperationsSummaryQuery) -> Result<HttpRequest, GatewayError> {
        Ok(self.transport.get(GET_OPERATIONS_SUMMARY.path, query_pairs(query)?))
    }

    pub fn get_operations_summary_api(&self, query: &GetOperationsSummaryQuery) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_operations_summary(query)?)
    }

    pub fn get_operations_summary(
        &self,
        query: &GetOperationsSummaryQuery,
    ) -> Result<GetOperationsSummaryResponse, GatewayError> {
        decode(self.get_operations_summary_api(query)?)
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    pub fn build_make_operation(&self, request: &MakeOperationRequest) -> Result<HttpRequest, GatewayError> {
        let endpoint = make_operation_endpoint(request.operation_type());
        self.transport.post_json(endpoint.path, request)
    }

    pub fn make_operation_api(&self, request: &MakeOperationRequest) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_make_operation(request)?)
    }

    pub fn make_operation(&self, request: &MakeOperationRequest) -> Result<MakeOperationResponse, GatewayError> {
        decode(self.make_operation_api(request)?)
    }

    per_kind_methods! {
        MAKE_FEE_OPERATION, MakeFeeOperationRequest =>
            build_make_fee_operation, make_fee_operation_api, make_fee_operation;
        MAKE_TOP_UP_OPERATION, MakeTopUpOperationRequest =>
            build_make_top_up_operation, make_top_up_operation_api, make_top_up_operation;
        MAKE_CASHBACK_OPERATION, MakeCashbackOperationRequest =>
            build_make_cashback_operation, make_cashback_operation_api, make_cashback_operation;
        MAKE_TRANSFER_OPERATION, MakeTransferOperationRequest =>
            build_make_transfer_operation, make_transfer_operation_api, make_transfer_operation;
        MAKE_PURCHASE_OPERATION, MakePurchaseOperationRequest =>
            build_make_purchase_operation, make_purchase_operation_api, make_purchase_operation;
        MAKE_BILL_PAYMENT_OPERATION, MakeBillPaymentOperationRequest =>
            build_make_bill_payment_operation, make_bill_payment_operation_api, make_bill_payment_operation;
        MAKE_CASH_WITHDRAWAL_OPERATION, MakeCashWithdrawalOperationRequest =>
            build_make_cash_withdrawal_operation, make_cash_withdrawal_operation_api, make_cash_withdrawal_operation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_support::{response, transport, BASE_URL};
    use crate::http::HttpMethod;
    use crate::types::operations::{OperationBase, OperationStatus};
    use serde_json::json;

    fn client() -> OperationsClient {
        OperationsClient::new(transport())
    }

    fn base() -> OperationBase {
        OperationBase::new(OperationStatus::InProgress, 10.0, "C1", "A1")
    }

    #[test]
    fn build_get_operation_substitutes_id() {
        let req = client().build_get_operation("op-42");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/v1/operations/op-42");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_operation_receipt_substitutes_id() {
        let req = client().build_get_operation_receipt("op-42");
        assert_eq!(
            req.url,
            "http://localhost:8080/api/v1/operations/operation-receipt/op-42"
        );
    }

    #[test]
    fn build_get_operations_sends_only_populated_filters() {
        let mut query = GetOperationsQuery::new("A1");
        query.limit = Some(10);
        query.operation_type = Some(OperationType::Purchase);
        let req = client().build_get_operations(&query).unwrap();
        assert_eq!(req.url, "http://localhost:8080/api/v1/operations");
        assert_eq!(req.query.len(), 3);
        assert_eq!(req.query_param("accountId"), Some("A1"));
        assert_eq!(req.query_param("limit"), Some("10"));
        assert_eq!(req.query_param("operationType"), Some("PURCHASE"));
        assert_eq!(req.query_param("offset"), None);
        assert_eq!(req.query_param("startDate"), None);
    }

    #[test]
    fn build_get_operations_summary_sends_group_by() {
        let mut query = GetOperationsSummaryQuery::new("A1");
        query.group_by = Some("category".to_string());
        query.start_date = Some("2026-01-01".to_string());
        let req = client().build_get_operations_summary(&query).unwrap();
        assert_eq!(req.url, "http://localhost:8080/api/v1/operations/operations-summary");
        assert_eq!(
            req.query,
            vec![
                ("accountId".to_string(), "A1".to_string()),
                ("groupBy".to_string(), "category".to_string()),
                ("startDate".to_string(), "2026-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn every_kind_maps_to_its_own_endpoint() {
        let paths: Vec<&str> = OperationType::ALL
            .iter()
            .map(|kind| make_operation_endpoint(*kind).path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "/api/v1/operations/make-fee-operation",
                "/api/v1/operations/make-top-up-operation",
                "/api/v1/operations/make-cashback-operation",
                "/api/v1/operations/make-transfer-operation",
                "/api/v1/operations/make-purchase-operation",
                "/api/v1/operations/make-bill-payment-operation",
                "/api/v1/operations/make-cash-withdrawal-operation",
            ]
        );
        assert!(OperationType::ALL
            .iter()
            .all(|kind| make_operation_endpoint(*kind).method == HttpMethod::Post));
    }

    #[test]
    fn build_make_operation_routes_by_kind() {
        let request: MakeOperationRequest = MakeBillPaymentOperationRequest {
            base: base(),
            bill_number: "B-2026-01".to_string(),
            bill_type: "utilities".to_string(),
            provider_name: "Mosenergo".to_string(),
            description: None,
            metadata: None,
        }
        .into();
        let req = client().build_make_operation(&request).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://localhost:8080/api/v1/operations/make-bill-payment-operation"
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "IN_PROGRESS",
                "amount": 10.0,
                "cardId": "C1",
                "accountId": "A1",
                "billNumber": "B-2026-01",
                "billType": "utilities",
                "providerName": "Mosenergo"
            })
        );
    }

    #[test]
    fn empty_account_id_is_not_blocked() {
        let mut request_base = base();
        request_base.account_id = String::new();
        let request: MakeOperationRequest = MakePurchaseOperationRequest {
            base: request_base,
            merchant_id: "M1".to_string(),
            merchant_name: "Shop".to_string(),
            category: "taxi".to_string(),
            location: None,
            description: None,
            metadata: None,
        }
        .into();
        let req = client().build_make_operation(&request).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["accountId"], "");
    }

    #[test]
    fn operation_envelope_matches_body() {
        let parsed: GetOperationResponse = decode(response(
            200,
            r#"{"operation":{"id":"O1","type":"PURCHASE","status":"IN_PROGRESS","amount":77.99,
                "cardId":"C1","accountId":"A1","category":"taxi","createdAt":"2026-10-14T09:00:00Z"}}"#,
        ))
        .unwrap();
        assert_eq!(parsed.operation.id, "O1");
        assert_eq!(parsed.operation.kind, OperationType::Purchase);
        assert_eq!(parsed.operation.status, OperationStatus::InProgress);
        assert_eq!(parsed.operation.category.as_deref(), Some("taxi"));
    }

    #[test]
    fn receipt_not_found_is_status_error() {
        let err = decode::<GetOperationReceiptResponse>(response(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn per_kind_builders_match_the_tagged_route() {
        let client = client();

        let fee = MakeFeeOperationRequest {
            base: base(),
            fee_type: "SERVICE".to_string(),
            description: None,
            metadata: None,
        };
        let req = client.build_make_fee_operation(&fee).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}/api/v1/operations/make-fee-operation"));
        assert_eq!(req, client.build_make_operation(&fee.into()).unwrap());

        let purchase = MakePurchaseOperationRequest {
            base: base(),
            merchant_id: "M1".to_string(),
            merchant_name: "Yandex Go".to_string(),
            category: "taxi".to_string(),
            location: None,
            description: None,
            metadata: None,
        };
        let req = client.build_make_purchase_operation(&purchase).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}/api/v1/operations/make-purchase-operation"));
        assert_eq!(req, client.build_make_operation(&purchase.into()).unwrap());

        let withdrawal = MakeCashWithdrawalOperationRequest {
            base: base(),
            atm_id: Some("ATM-9".to_string()),
            atm_location: None,
            currency: "RUB".to_string(),
            description: None,
            metadata: None,
        };
        let req = client.build_make_cash_withdrawal_operation(&withdrawal).unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["atmId"], "ATM-9");
        assert_eq!(req, client.build_make_operation(&withdrawal.into()).unwrap());
    }

    #[test]
    fn unknown_status_value_fails_decoding() {
        let body = r#"{"operations":[{"id":"O1","type":"FEE","status":"PENDING","amount":1.0,
            "cardId":"C1","accountId":"A1"}]}"#;
        let err = decode::<GetOperationsResponse>(response(200, body)).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(ref msg) if msg.contains("PENDING")));
    }

    #[test]
    fn make_operation_response_decodes_operation_id() {
        let parsed: MakeOperationResponse = decode(response(200, r#"{"operationId":"O7"}"#)).unwrap();
        assert_eq!(parsed.operation_id, "O7");
    }
}
