// output formatting - pretty tables or raw json

use crate::core::{Client, ItemLine, Order, OrderWithItems};
use serde::Serialize;

const MAX_WIDTH: usize = 40;

pub struct Output;

impl Output {
    pub fn clients(clients: &[Client]) {
        let rows = clients
            .iter()
            .map(|c| vec![c.id.to_string(), c.tax_id.clone(), c.name.clone()])
            .collect::<Vec<_>>();
        table(&["id", "tax id", "name"], &rows);
    }

    pub fn orders(orders: &[Order]) {
        let rows = orders
            .iter()
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.client_id.to_string(),
                    o.client_name.clone(),
                    o.created_at.clone(),
                ]
            })
            .collect::<Vec<_>>();
        table(&["order", "client", "name", "created"], &rows);
    }

    pub fn order(order: &OrderWithItems) {
        let o = &order.order;
        println!("order {} for {} (client {})", o.id, o.client_name, o.client_id);
        println!("created: {}\n", o.created_at);
        Self::items(&order.items);
    }

    pub fn items(items: &[ItemLine]) {
        let rows = items
            .iter()
            .map(|i| {
                vec![
                    i.product_id.to_string(),
                    i.description.clone(),
                    i.quantity.to_string(),
                    format!("{:.2}", i.unit_price),
                ]
            })
            .collect::<Vec<_>>();
        table(&["product", "description", "qty", "unit price"], &rows);
    }

    // raw json for scripts
    pub fn raw<T: Serialize>(value: &T) {
        println!("{}", serde_json::to_string(value).unwrap_or_default());
    }
}

fn table(columns: &[&str], rows: &[Vec<String>]) {
    println!("rows: {}\n", rows.len());

    if rows.is_empty() {
        println!("no results");
        return;
    }

    for line in render(columns, rows) {
        println!("{line}");
    }
}

// header, separator, then one line per row
fn render(columns: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();

    for row in rows {
        for (i, val) in row.iter().enumerate() {
            widths[i] = widths[i].max(val.chars().count());
        }
    }

    // cap so long descriptions don't blow up the table
    for w in &mut widths {
        *w = (*w).min(MAX_WIDTH);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
        .collect();
    lines.push(header.join(" | "));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(sep.join("-+-"));

    for row in rows {
        let formatted: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:width$}", truncate(v), width = widths[i]))
            .collect();
        lines.push(formatted.join(" | "));
    }

    lines
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_WIDTH {
        let head: String = s.chars().take(MAX_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_value() {
        let rows = vec![vec!["1".to_string(), "ACME".to_string()]];
        let lines = render(&["id", "name"], &rows);
        assert_eq!(lines[0], "id | name");
        assert_eq!(lines[1], "---+-----");
        assert_eq!(lines[2], "1  | ACME");
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(60);
        let out = truncate(&long);
        assert_eq!(out.chars().count(), MAX_WIDTH);
        assert!(out.ends_with("..."));
    }
}
