mod common;

use common::*;
use fund_assistant::config::Config;
use fund_assistant::data_provider::FundCatalog;
use fund_assistant::errors::FundError;
use fund_assistant::models::{FundType, RiskLevel};
use fund_assistant::scrapers::{FetchOutcome, TianTianScraper};
use fund_assistant::services::FundService;
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::{Arc, Mutex};

fn service(transport: ScriptedTransport) -> (FundService, Arc<Mutex<Vec<Call>>>) {
    let calls = transport.calls();
    let catalog = FundCatalog::bundled().unwrap();
    let service = FundService::new(Config::new(), Arc::new(TianTianScraper::new(transport)), catalog);
    (service, calls)
}

fn codes(items: &[&str]) -> Vec<String> {
    items.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn compare_omits_funds_without_data() {
    let transport = ScriptedTransport::new()
        .mobile("FundMNBasicInformation", "110022", 200, &detail_body("110022", "易方达消费行业股票"))
        .mobile("FundMNBasicInformation", "999999", 200, NOT_FOUND_BODY)
        .mobile("FundMNBasicInformation", "161725", 200, &detail_body("161725", "招商中证白酒指数(LOF)A"));
    let (service, calls) = service(transport);

    let comparison = service.compare_funds(&codes(&["110022", "999999", "161725"])).await.unwrap();
    let compared: Vec<&str> = comparison.details.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(compared, vec!["110022", "161725"]);
    assert_eq!(comparison.skipped, vec![("999999".to_string(), "no data for this code".to_string())]);
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn compare_rejects_wrong_number_of_codes() {
    let (service, calls) = service(ScriptedTransport::new());

    let too_few = service.compare_funds(&codes(&["110022"])).await;
    assert!(matches!(too_few, Err(FundError::InvalidInput(_))));

    let too_many = service.compare_funds(&codes(&["1", "2", "3", "4", "5"])).await;
    assert!(matches!(too_many, Err(FundError::InvalidInput(_))));

    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn holdings_name_comes_from_catalog() {
    let transport = ScriptedTransport::new()
        .mobile("FundMNInverstPosition", "161725", 200, HOLDINGS_161725)
        .mobile("FundMNInverstPosition", "888888", 200, HOLDINGS_161725);
    let (service, _) = service(transport);

    let known = service.fund_holdings("161725").await.found().unwrap();
    assert_eq!(known.name, service.catalog().get("161725").unwrap().name);

    let unknown = service.fund_holdings("888888").await.found().unwrap();
    assert_eq!(unknown.name, "Unknown");
}

#[tokio::test]
async fn price_is_enriched_from_catalog_with_one_request() {
    let transport = ScriptedTransport::new().estimate("110022", 200, ESTIMATE_110022);
    let (service, calls) = service(transport);

    let price = service.fund_price("110022").await.found().unwrap();
    assert_eq!(price.estimate_value, Some(dec!(3.4567)));
    assert_eq!(price.fund_type, Some(FundType::Stock));
    assert_eq!(price.risk_level, Some(RiskLevel::High));
    assert_eq!(price.scale, None);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn price_failure_is_reported() {
    let (service, _) = service(ScriptedTransport::new());

    assert!(matches!(service.fund_price("110022").await, FetchOutcome::Unreachable(_)));
}

#[tokio::test]
async fn history_limit_defaults_to_config() {
    let body = history_body(&[("2024-01-30", "3.4567", "4.1567", "1.31%")], 3736);
    let transport = ScriptedTransport::new().history("110022", &body);
    let (service, calls) = service(transport);

    service.history("110022", None).await.found().unwrap();
    service.history("110022", Some(3)).await.found().unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].param("per"), Some("10"));
    assert_eq!(calls[1].param("per"), Some("3"));
}

#[test]
fn catalog_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"money": [{{"code": "000198", "name": "天弘余额宝货币", "fund_type": "money", "risk_level": "极低风险", "hot": true}}]}}"#
    )
    .unwrap();

    let catalog = FundCatalog::load_from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.hot(Some(FundType::Money))[0].code, "000198");
    assert!(catalog.list(Some(FundType::Stock)).is_empty());
}

#[test]
fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let result = FundCatalog::load_from_file(path.to_str().unwrap());
    assert!(matches!(result, Err(FundError::DataError(_))));
}

#[test]
fn list_search_and_calculate_through_service() {
    let (service, _) = service(ScriptedTransport::new());

    assert!(!service.fund_list(None).is_empty());
    assert!(service.fund_list(Some(FundType::Bond)).iter().all(|f| f.fund_type == FundType::Bond));
    assert!(service.hot_funds(None).len() <= service.fund_list(None).len());
    assert_eq!(service.search_funds("110022")[0].code, "110022");

    let projection = service
        .calculate_dca("110022", dec!(1000), 1, fund_assistant::models::Frequency::Monthly)
        .unwrap();
    assert_eq!(projection.total_invested, dec!(12000));
}
