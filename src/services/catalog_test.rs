use super::*;
use crate::net::mock::MockTransport;
use serde_json::json;

fn sale(customer: Option<&str>, customer_id: Option<Id>) -> Sale {
    serde_json::from_value(json!({"id": 1, "total": 10, "customer": customer, "customer_id": customer_id})).unwrap()
}

#[tokio::test]
async fn product_lookups_degrade_independently() {
    let (api, _) = MockTransport::default()
        .route("/categories", 200, json!({"success": true, "data": [{"id": 2, "name": "Lácteos"}]}))
        .route_fail("/suppliers")
        .into_client();
    let refs = ReferenceData::for_products(&api).await;
    assert_eq!(refs.categories.len(), 1);
    assert!(refs.suppliers.is_empty());
    assert_eq!(refs.category_name(Some(2)), "Lácteos");
    assert_eq!(refs.supplier_name(Some(4)), "Proveedor ID: 4");
}

#[test]
fn missing_and_unknown_ids_have_placeholders() {
    let refs = ReferenceData::default();
    assert_eq!(refs.category_name(None), "Sin categoría");
    assert_eq!(refs.category_name(Some(7)), "Categoría ID: 7");
    assert_eq!(refs.supplier_name(None), "Sin proveedor");
}

#[tokio::test]
async fn customer_name_prefers_sale_then_lookup() {
    let (api, _) = MockTransport::default()
        .route("/customers", 200, json!([{"id": 3, "first_name": "Ana", "last_name": "Ruiz"}]))
        .into_client();
    let refs = ReferenceData::for_sales(&api).await;

    assert_eq!(refs.customer_name(&sale(Some("Mostrador"), Some(3))), "Mostrador");
    assert_eq!(refs.customer_name(&sale(Some("  "), Some(3))), "Ana Ruiz");
    assert_eq!(refs.customer_name(&sale(None, Some(9))), "Cliente ID: 9");
    assert_eq!(refs.customer_name(&sale(None, None)), "Cliente desconocido");
}
