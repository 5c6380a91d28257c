use super::*;

fn product(cost: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": 12, "name": "Harina", "price": 3, "cost": cost, "stock": 40
    }))
    .unwrap()
}

#[test]
fn selecting_a_product_prefills_cost() {
    let mut draft = PurchaseItemDraft::default();
    draft.select_product(&product(1.75));
    assert_eq!(draft.product_id, "12");
    assert_eq!(draft.cost, "1.75");

    let mut manual = PurchaseItemDraft { cost: "2".into(), ..PurchaseItemDraft::default() };
    manual.select_product(&product(0.0));
    assert_eq!(manual.cost, "2");
}

#[test]
fn product_is_required() {
    let draft = PurchaseItemDraft { quantity: "1".into(), cost: "1".into(), ..PurchaseItemDraft::default() };
    assert_eq!(draft.normalize(), Err(FormError::Required("Debe seleccionar un producto")));
}

#[test]
fn quantity_must_be_positive_integer() {
    for bad in ["", "0", "-2", "x"] {
        let draft = PurchaseItemDraft { product_id: "1".into(), quantity: bad.into(), cost: "1".into(), ..PurchaseItemDraft::default() };
        assert_eq!(draft.normalize(), Err(FormError::Invalid("Por favor ingrese una cantidad válida mayor a 0")));
    }
}

#[test]
fn cost_may_be_zero_but_not_negative_or_blank() {
    let ok = PurchaseItemDraft { product_id: "1".into(), quantity: "2".into(), cost: "0".into(), ..PurchaseItemDraft::default() };
    assert!(ok.normalize().is_ok());
    for bad in ["", "-1"] {
        let draft = PurchaseItemDraft { cost: bad.into(), ..ok.clone() };
        assert_eq!(draft.normalize(), Err(FormError::Invalid("Por favor ingrese un costo unitario válido")));
    }
}

#[test]
fn payload_omits_missing_purchase_id() {
    let draft = PurchaseItemDraft { product_id: "1".into(), quantity: "2".into(), cost: "3.5".into(), ..PurchaseItemDraft::default() };
    let payload = draft.normalize().unwrap();
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        serde_json::json!({"product_id": 1, "quantity": 2, "cost": 3.5})
    );

    let linked = PurchaseItemDraft { purchase_id: "4".into(), ..draft };
    assert_eq!(linked.normalize().unwrap().purchase_id, Some(4));
}
