use super::*;

fn s(v: &[&str]) -> Vec<String> {
    v.iter().map(|x| (*x).to_string()).collect()
}

#[test]
fn text_table_aligns_columns() {
    let out = text_table(&s(&["ID", "Nombre"]), &[s(&["1", "Café"]), s(&["10", "Té"])]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID  Nombre");
    assert_eq!(lines[1], "--  ------");
    assert_eq!(lines[2], "1   Café");
    assert_eq!(lines[3], "10  Té");
}

#[test]
fn text_table_with_no_rows_prints_header_only() {
    let out = text_table(&s(&["A"]), &[]);
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn money_groups_thousands() {
    assert_eq!(money(0.0), "$0.00");
    assert_eq!(money(12.5), "$12.50");
    assert_eq!(money(1234.5), "$1,234.50");
    assert_eq!(money(1_234_567.891), "$1,234,567.89");
    assert_eq!(money(-999.999), "-$1,000.00");
}

#[test]
fn percent_has_one_decimal() {
    assert_eq!(percent(33.333), "33.3%");
}

#[test]
fn key_values_aligns_values() {
    let out = key_values(&[("Total", "3".into()), ("Bajo stock", "1".into())]);
    assert_eq!(out, "Total:      3\nBajo stock: 1\n");
}
