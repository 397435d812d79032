//! Investors.

use crate::cms::{CmsRequest, StrapiQuery, endpoints};
use crate::content::mappers::{map_dividend_data, map_top_banner_data};

use super::{Page, PageBuilder, PageContext, Route, Section};

/// `/investors`: banner and dividend history, both from the `investor`
/// single type.
pub async fn investors(ctx: &PageContext) -> Page {
    let raw = ctx
        .fetch(CmsRequest::new(endpoints::INVESTORS).with_query(StrapiQuery::new().populate_all()))
        .await;

    let mut page = PageBuilder::new(ctx, Route::Investors);
    page.banner(raw.as_ref().and_then(map_top_banner_data));
    let dividends = page.or_fallback("dividends", raw.as_ref().and_then(map_dividend_data), |c| {
        c.dividends.clone()
    });
    page.push(Section::DividendTable(dividends));
    page.finish()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, offline};
    use super::*;
    use crate::cms::MemoryCms;
    use serde_json::json;

    #[tokio::test]
    async fn offline_dividends() {
        let page = investors(&offline()).await;
        let Some(Section::DividendTable(table)) = page.section("DividendTable") else {
            panic!("missing table");
        };
        assert_eq!(table.rows[0].financial_year, "2024-25");
    }

    #[tokio::test]
    async fn cms_dividends() {
        let cms = MemoryCms::offline().with_response(
            endpoints::INVESTORS,
            json!({"data": {"DividendHistory": {
                "Heading": "Dividends",
                "Rows": [{"FinancialYear": "2019-20", "DividendPerShare": "₹ 6.00"}]
            }}}),
        );
        let page = investors(&context(cms)).await;
        let Some(Section::DividendTable(table)) = page.section("DividendTable") else {
            panic!("missing table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].financial_year, "2019-20");
        assert_eq!(page.fallbacks, vec!["banner"]);
    }
}
