//! Terminal Rendering
//!
//! Plain-text versions of the five screens for the CLI. Every screen goes
//! through [`FetchState::display`], so the terminal obeys the same
//! spinner / error / not-found / content order as the browser.

use std::fmt::Write;

use crate::charts::{self, Datum};
use crate::format;
use crate::models::{Customer, Product, Recommendation, Transaction};
use crate::view::{FetchState, Render};
use crate::views::{
    CustomerDetailView, CustomersView, DashboardView, ProductDetailView, ProductsView, Screen,
};

/// Width of the longest terminal bar
const BAR_WIDTH: usize = 40;

pub fn screen(screen: &Screen) -> String {
    match screen {
        Screen::Dashboard(view) => dashboard(view),
        Screen::Customers(view) => customers(view),
        Screen::CustomerDetail(view) => customer_detail(view),
        Screen::Products(view) => products(view),
        Screen::ProductDetail(view) => product_detail(view),
        Screen::NotFound(path) => format!("Page not found: {}\n", path),
    }
}

/// Shared fetch-state gate. `entity` names what was not found.
fn gated<T>(state: &FetchState<T>, entity: &str, content: impl FnOnce(&T) -> String) -> String {
    match state.display() {
        Render::Spinner => "Loading...\n".to_string(),
        Render::Error(message) => format!("Error: {}\n", message),
        Render::NotFound => format!("{} not found\n", entity),
        Render::Content(data) => content(data),
    }
}

pub fn dashboard(view: &DashboardView) -> String {
    gated(&view.stats, "Dashboard", |stats| {
        let mut out = String::new();
        let _ = writeln!(out, "Total Customers  {}", format::count(stats.total_customers));
        let _ = writeln!(out, "Total Sales      {}", format::currency(stats.total_sales));
        let _ = writeln!(out, "Open Tickets     {}", format::count(stats.open_tickets));

        let (regions, products, trend) = charts::dashboard_series(stats);

        out.push_str("\nSales by Region\n");
        out.push_str(&bar_chart(&regions));

        out.push_str("\nTop Products by Sales\n");
        let slices = charts::pie_slices(&products);
        if slices.is_empty() {
            out.push_str("  No sales recorded\n");
        }
        for slice in slices {
            let _ = writeln!(out, "  {}", slice.caption());
        }

        out.push_str("\nSales Trend (Last 12 Months)\n");
        out.push_str(&bar_chart(&trend));
        out
    })
}

/// Horizontal bars scaled to the chart axis
pub fn bar_chart(data: &[Datum]) -> String {
    if data.is_empty() {
        return "  No data\n".to_string();
    }

    let (_, bars) = charts::bars(data);
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for bar in bars {
        let filled = (bar.ratio * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<width$} {} {}",
            bar.label,
            "#".repeat(filled),
            format::currency(bar.value),
            width = label_width
        );
    }
    out
}

pub fn customers(view: &CustomersView) -> String {
    gated(&view.customers, "Customers", |all| {
        let rows: Vec<Vec<String>> = view.rows().into_iter().map(customer_row).collect();
        let mut out = table(&["ID", "Name", "Industry", "Region", "Join Date"], &rows);
        let _ = writeln!(out, "\n{} of {} customers", rows.len(), all.len());
        out
    })
}

fn customer_row(c: &Customer) -> Vec<String> {
    vec![
        c.customer_id.to_string(),
        c.customer_name.clone(),
        c.industry.clone(),
        c.region.clone(),
        c.join_date.clone(),
    ]
}

pub fn customer_detail(view: &CustomerDetailView) -> String {
    gated(&view.detail, "Customer", |detail| {
        let c = &detail.entity;
        let m = &detail.metrics;
        let mut out = String::new();

        let _ = writeln!(out, "{}", format::or_fallback(&c.customer_name, "Unknown Customer"));
        out.push_str("\nCustomer Information\n");
        let _ = writeln!(out, "  Industry: {}", format::or_na(&c.industry));
        let _ = writeln!(out, "  Region: {}", format::or_na(&c.region));
        let _ = writeln!(out, "  Member Since: {}", format::or_na(&c.join_date));

        out.push_str("\nPurchase Summary\n");
        let _ = writeln!(out, "  Total Spent: {}", format::currency(m.total_spent));
        let _ = writeln!(out, "  Transactions: {}", format::count(m.total_transactions));
        let _ = writeln!(
            out,
            "  Favorite Category: {}",
            format::or_na(m.favorite_category.as_deref().unwrap_or_default())
        );

        out.push_str("\nSupport Summary\n");
        let _ = writeln!(out, "  Open Tickets: {}", format::count(m.open_tickets));
        let _ = writeln!(out, "  Average Sentiment: {}", format::score(m.avg_sentiment));

        out.push_str("\nRecent Transactions\n");
        out.push_str(&transactions(&view.transactions));
        out
    })
}

fn transactions(state: &FetchState<Vec<Transaction>>) -> String {
    gated(state, "Transactions", |rows| {
        if rows.is_empty() {
            return "No transactions found\n".to_string();
        }
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.transaction_date.clone(),
                    t.product_id.to_string(),
                    t.quantity.to_string(),
                    format::currency(t.sale_amount),
                ]
            })
            .collect();
        table(&["Date", "Product ID", "Quantity", "Amount"], &rows)
    })
}

pub fn products(view: &ProductsView) -> String {
    gated(&view.products, "Products", |all| {
        let rows: Vec<Vec<String>> = view.rows().into_iter().map(product_row).collect();
        let mut out = table(&["ID", "Name", "Category", "Cost Price", "Sales Price"], &rows);
        let _ = writeln!(out, "\n{} of {} products", rows.len(), all.len());
        out
    })
}

fn product_row(p: &Product) -> Vec<String> {
    vec![
        p.product_id.to_string(),
        p.product_name.clone(),
        p.category.clone(),
        format::currency(p.cost_price),
        format::currency(p.sales_price),
    ]
}

pub fn product_detail(view: &ProductDetailView) -> String {
    gated(&view.detail, "Product", |detail| {
        let p = &detail.entity;
        let m = &detail.metrics;
        let mut out = String::new();

        let _ = writeln!(out, "{}", format::or_fallback(&p.product_name, "Unknown Product"));
        out.push_str("\nProduct Information\n");
        let _ = writeln!(out, "  Category: {}", format::or_na(&p.category));
        let _ = writeln!(out, "  Cost Price: {}", format::currency(p.cost_price));
        let _ = writeln!(out, "  Sales Price: {}", format::currency(p.sales_price));
        let _ = writeln!(out, "  Profit Margin: {}", format::margin(p.margin_percent()));

        out.push_str("\nSales Performance\n");
        let _ = writeln!(out, "  Total Sales: {}", format::currency(m.total_sales));
        let _ = writeln!(out, "  Total Quantity Sold: {}", format::count(m.total_quantity));
        let _ = writeln!(out, "  Total Profit: {}", format::currency(m.profit));

        out.push_str("\nCustomer Feedback\n");
        let _ = writeln!(out, "  Average Sentiment: {}", format::score(m.avg_sentiment));
        out.push_str("  Common Issues:\n");
        if m.common_issues.is_empty() {
            out.push_str("    - No common issues reported\n");
        }
        for issue in &m.common_issues {
            let _ = writeln!(out, "    - {}", issue);
        }

        out.push_str("\nFrequently Bought Together\n");
        out.push_str(&recommendations(&view.recommendations));
        out
    })
}

fn recommendations(state: &FetchState<Vec<Recommendation>>) -> String {
    gated(state, "Recommendations", |recs| {
        if recs.is_empty() {
            return "  No recommendations available\n".to_string();
        }
        recs.iter()
            .map(|rec| {
                format!(
                    "  - {} (confidence: {})\n",
                    rec.product_name.as_deref().unwrap_or("Unknown Product"),
                    format::score(rec.confidence)
                )
            })
            .collect()
    })
}

/// Left-aligned columns sized to their widest cell
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CustomerFacet, CustomerFilter};
    use crate::models::{normalize_detail, CustomerMetrics, DashboardStats, ProductMetrics, RegionSales};
    use serde_json::json;

    fn customer(id: i64, name: &str, region: &str) -> Customer {
        Customer {
            customer_id: id,
            customer_name: name.to_string(),
            industry: "Retail".to_string(),
            region: region.to_string(),
            join_date: "2023-04-01".to_string(),
        }
    }

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["ID", "Name"],
            &[vec!["1".into(), "Acme".into()], vec!["22".into(), "Globex".into()]],
        );
        assert_eq!(out, "ID  Name\n--  ------\n1   Acme\n22  Globex\n");
    }

    #[test]
    fn test_gate_order() {
        let loading: FetchState<u8> = FetchState::Loading;
        assert_eq!(gated(&loading, "Customer", |_| String::new()), "Loading...\n");

        let failed: FetchState<u8> = FetchState::Failed("Network error: refused".into());
        assert_eq!(
            gated(&failed, "Customer", |_| String::new()),
            "Error: Network error: refused\n"
        );

        let missing: FetchState<u8> = FetchState::Missing;
        assert_eq!(gated(&missing, "Customer", |_| String::new()), "Customer not found\n");
    }

    #[test]
    fn test_dashboard_cards_and_bars() {
        let view = DashboardView {
            stats: FetchState::Ready(DashboardStats {
                total_customers: 1200,
                total_sales: 98765.4,
                open_tickets: 3,
                sales_by_region: vec![
                    RegionSales { region: "West".into(), total_sales: 500.0 },
                    RegionSales { region: "East".into(), total_sales: 250.0 },
                ],
                ..Default::default()
            }),
        };
        let out = dashboard(&view);

        assert!(out.contains("Total Customers  1,200"));
        assert!(out.contains("Total Sales      $98,765.40"));
        assert!(out.contains(&format!("  West {} $500.00", "#".repeat(BAR_WIDTH))));
        assert!(out.contains(&format!("  East {} $250.00", "#".repeat(BAR_WIDTH / 2))));
        assert!(out.contains("No sales recorded"));
    }

    #[test]
    fn test_customers_table_is_filtered() {
        let view = CustomersView {
            customers: FetchState::Ready(vec![customer(1, "Acme", "West"), customer(2, "Globex", "East")]),
            filter: CustomerFilter::new().with(CustomerFacet::Region, "East"),
        };
        let out = customers(&view);
        assert!(out.contains("Globex"));
        assert!(!out.contains("Acme"));
        assert!(out.contains("1 of 2 customers"));
    }

    #[test]
    fn test_nested_and_flat_render_identically() {
        let nested = json!({
            "customer": {"customer_id": 5, "customer_name": "Acme", "industry": "Retail", "region": "West", "join_date": "2023-04-01"},
            "total_spent": 1234.5,
            "total_transactions": 4,
            "open_tickets": 0,
            "avg_sentiment": 0.25,
            "favorite_category": null
        });
        let flat = json!({
            "customer_id": 5, "customer_name": "Acme", "industry": "Retail", "region": "West", "join_date": "2023-04-01",
            "total_spent": 1234.5,
            "total_transactions": 4,
            "open_tickets": 0,
            "avg_sentiment": 0.25
        });

        let view = |value| CustomerDetailView {
            id: "5".to_string(),
            detail: FetchState::from_result(normalize_detail::<Customer, CustomerMetrics>(value)),
            transactions: FetchState::Ready(Vec::new()),
        };

        let a = customer_detail(&view(nested));
        let b = customer_detail(&view(flat));
        assert_eq!(a, b);
        assert!(a.contains("Total Spent: $1,234.50"));
        assert!(a.contains("Favorite Category: N/A"));
        assert!(a.contains("No transactions found"));
    }

    #[test]
    fn test_customer_fallback_name() {
        let view = CustomerDetailView {
            id: "5".to_string(),
            detail: FetchState::Ready(crate::models::Detail {
                entity: customer(5, "", ""),
                metrics: CustomerMetrics::default(),
            }),
            transactions: FetchState::Loading,
        };
        let out = customer_detail(&view);
        assert!(out.starts_with("Unknown Customer\n"));
        assert!(out.contains("Region: N/A"));
        assert!(out.ends_with("Recent Transactions\nLoading...\n"));
    }

    #[test]
    fn test_product_detail_empty_sections() {
        let view = ProductDetailView {
            id: "9".to_string(),
            detail: FetchState::Ready(crate::models::Detail {
                entity: Product {
                    product_id: 9,
                    product_name: "Desk".into(),
                    category: "Furniture".into(),
                    cost_price: 0.0,
                    sales_price: 120.0,
                },
                metrics: ProductMetrics::default(),
            }),
            recommendations: FetchState::Ready(Vec::new()),
        };
        let out = product_detail(&view);
        assert!(out.contains("Profit Margin: N/A"));
        assert!(out.contains("No common issues reported"));
        assert!(out.contains("No recommendations available"));
    }

    #[test]
    fn test_recommendation_lines() {
        let state = FetchState::Ready(vec![Recommendation {
            product_id: 3,
            product_name: None,
            confidence: 0.5,
        }]);
        assert_eq!(recommendations(&state), "  - Unknown Product (confidence: 0.50)\n");
    }

    #[test]
    fn test_not_found_screen() {
        assert_eq!(screen(&Screen::NotFound("/nope".into())), "Page not found: /nope\n");
    }
}
