// src/services/revenue_service.rs
//
// Toda a agregação de receita acontece aqui, em memória, sobre as linhas
// cruas que o RevenueRepository busca. As funções são puras (recebem `today`
// como argumento) justamente para serem testáveis sem banco.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RevenueRepository,
    models::revenue::{
        ClientRevenue, Deal, MonthlyRevenue, PipelineBucket, Quote, QuotePipeline, QuoteStatus,
        RevenueGroup, RevenueSummary, TalentRevenue,
    },
};

#[derive(Clone)]
pub struct RevenueService {
    repo: RevenueRepository,
}

impl RevenueService {
    pub fn new(repo: RevenueRepository) -> Self {
        Self { repo }
    }

    pub async fn list_deals(&self) -> Result<Vec<Deal>, AppError> {
        self.repo.list_deals().await
    }

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        self.repo.list_quotes().await
    }

    pub async fn summary(&self, today: NaiveDate) -> Result<RevenueSummary, AppError> {
        let deals = self.repo.list_deals().await?;
        Ok(summarize(&deals, today))
    }

    pub async fn revenue_by_talent(&self) -> Result<Vec<TalentRevenue>, AppError> {
        let deals = self.repo.list_deals().await?;
        Ok(revenue_by_talent(&deals))
    }

    pub async fn revenue_by_client(&self) -> Result<Vec<ClientRevenue>, AppError> {
        let deals = self.repo.list_deals().await?;
        Ok(revenue_by_client(&deals))
    }

    pub async fn revenue_over_time(&self, today: NaiveDate) -> Result<Vec<MonthlyRevenue>, AppError> {
        let deals = self.repo.list_deals().await?;
        Ok(monthly_series(&deals, today))
    }

    pub async fn talent_stats(&self, talent_id: Uuid) -> Result<RevenueGroup, AppError> {
        let deals = self.repo.list_deals().await?;
        Ok(talent_revenue_stats(&deals, talent_id))
    }

    pub async fn quote_pipeline(&self) -> Result<QuotePipeline, AppError> {
        let quotes = self.repo.list_quotes().await?;
        Ok(quote_pipeline(&quotes))
    }
}

// =============================================================================
//  FUNÇÕES PURAS DE AGREGAÇÃO
// =============================================================================

// Redução group-by genérica: conta, soma e guarda a data de deal mais recente.
fn group_deals<K, F>(deals: &[Deal], key_of: F) -> HashMap<K, RevenueGroup>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Deal) -> Option<K>,
{
    let mut groups: HashMap<K, RevenueGroup> = HashMap::new();

    for deal in deals {
        let Some(key) = key_of(deal) else {
            continue;
        };
        let group = groups.entry(key).or_insert(RevenueGroup {
            deal_count: 0,
            total_revenue: 0,
            avg_deal_size: 0,
            last_deal_date: None,
        });
        group.deal_count += 1;
        group.total_revenue += deal.commission_amount;
        if group.last_deal_date.is_none_or(|d| deal.deal_date > d) {
            group.last_deal_date = Some(deal.deal_date);
        }
    }

    // A média é um ramo explícito: zero deals => média zero, sem divisão
    for group in groups.values_mut() {
        group.avg_deal_size = if group.deal_count > 0 {
            group.total_revenue / group.deal_count
        } else {
            0
        };
    }

    groups
}

pub fn revenue_by_talent(deals: &[Deal]) -> Vec<TalentRevenue> {
    let mut rows: Vec<TalentRevenue> = group_deals(deals, |d| d.talent_id)
        .into_iter()
        .map(|(talent_id, stats)| TalentRevenue { talent_id, stats })
        .collect();
    rows.sort_by(|a, b| b.stats.total_revenue.cmp(&a.stats.total_revenue));
    rows
}

pub fn revenue_by_client(deals: &[Deal]) -> Vec<ClientRevenue> {
    let mut rows: Vec<ClientRevenue> = group_deals(deals, |d| d.client_id)
        .into_iter()
        .map(|(client_id, stats)| ClientRevenue { client_id, stats })
        .collect();
    rows.sort_by(|a, b| b.stats.total_revenue.cmp(&a.stats.total_revenue));
    rows
}

/// Estatísticas de um único talento (zero deals => tudo zerado, data nula)
pub fn talent_revenue_stats(deals: &[Deal], talent_id: Uuid) -> RevenueGroup {
    group_deals(deals, |d| d.talent_id.filter(|&id| id == talent_id))
        .remove(&talent_id)
        .unwrap_or(RevenueGroup {
            deal_count: 0,
            total_revenue: 0,
            avg_deal_size: 0,
            last_deal_date: None,
        })
}

// --- Janelas de calendário ---

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("primeiro dia do mês é sempre válido")
}

// Desloca (ano, mês) por `delta` meses, em aritmética de índice de mês
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + month as i32 - 1 + delta;
    (idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32)
}

// Intervalo fechado [início, fim] do mês que contém `date`
fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = first_of_month(date.year(), date.month());
    let (ny, nm) = shift_month(date.year(), date.month(), 1);
    let end = first_of_month(ny, nm).pred_opt().expect("véspera do primeiro dia existe");
    (start, end)
}

// Intervalo fechado do trimestre-calendário que contém `date`
fn quarter_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let quarter_month = ((date.month() - 1) / 3) * 3 + 1;
    let start = first_of_month(date.year(), quarter_month);
    let (ny, nm) = shift_month(date.year(), quarter_month, 3);
    let end = first_of_month(ny, nm).pred_opt().expect("véspera do primeiro dia existe");
    (start, end)
}

// Soma das comissões dentro do intervalo fechado (comparação inclusiva)
fn revenue_in_window(deals: &[Deal], start: NaiveDate, end: NaiveDate) -> i64 {
    deals
        .iter()
        .filter(|d| d.deal_date >= start && d.deal_date <= end)
        .map(|d| d.commission_amount)
        .sum()
}

pub fn summarize(deals: &[Deal], today: NaiveDate) -> RevenueSummary {
    let deal_count = deals.len() as i64;
    let total_revenue: i64 = deals.iter().map(|d| d.commission_amount).sum();
    let avg_deal_size = if deal_count > 0 { total_revenue / deal_count } else { 0 };

    let (tm_start, tm_end) = month_bounds(today);
    let last_month_ref = tm_start.pred_opt().expect("véspera do primeiro dia existe");
    let (lm_start, lm_end) = month_bounds(last_month_ref);

    let (tq_start, tq_end) = quarter_bounds(today);
    let last_quarter_ref = tq_start.pred_opt().expect("véspera do primeiro dia existe");
    let (lq_start, lq_end) = quarter_bounds(last_quarter_ref);

    RevenueSummary {
        total_revenue,
        deal_count,
        avg_deal_size,
        this_month: revenue_in_window(deals, tm_start, tm_end),
        last_month: revenue_in_window(deals, lm_start, lm_end),
        this_quarter: revenue_in_window(deals, tq_start, tq_end),
        last_quarter: revenue_in_window(deals, lq_start, lq_end),
    }
}

/// Série dos 12 meses-calendário até `today`, em ordem cronológica.
/// Cada mês é pré-semeado com balde zerado: meses sem deal aparecem com 0.
pub fn monthly_series(deals: &[Deal], today: NaiveDate) -> Vec<MonthlyRevenue> {
    let mut series: Vec<MonthlyRevenue> = Vec::with_capacity(12);
    let mut index: HashMap<String, usize> = HashMap::new();

    for offset in (0..12).rev() {
        let (year, month) = shift_month(today.year(), today.month(), -offset);
        let key = format!("{:04}-{:02}", year, month);
        index.insert(key.clone(), series.len());
        series.push(MonthlyRevenue { month: key, deal_count: 0, total_revenue: 0 });
    }

    for deal in deals {
        let key = format!("{:04}-{:02}", deal.deal_date.year(), deal.deal_date.month());
        if let Some(&i) = index.get(&key) {
            series[i].deal_count += 1;
            series[i].total_revenue += deal.commission_amount;
        }
    }

    series
}

// --- Pipeline de orçamentos ---

pub fn quote_pipeline(quotes: &[Quote]) -> QuotePipeline {
    let mut pipeline = QuotePipeline {
        draft: PipelineBucket::default(),
        sent: PipelineBucket::default(),
        accepted: PipelineBucket::default(),
        rejected: PipelineBucket::default(),
        expired: PipelineBucket::default(),
        win_rate: 0.0,
    };

    for quote in quotes {
        let bucket = match quote.status {
            QuoteStatus::Draft => &mut pipeline.draft,
            QuoteStatus::Sent => &mut pipeline.sent,
            QuoteStatus::Accepted => &mut pipeline.accepted,
            QuoteStatus::Rejected => &mut pipeline.rejected,
            QuoteStatus::Expired => &mut pipeline.expired,
        };
        bucket.count += 1;
        bucket.value += quote.total_amount;
    }

    let closed = pipeline.accepted.count + pipeline.rejected.count;
    pipeline.win_rate = if closed > 0 {
        (pipeline.accepted.count as f64 / closed as f64) * 100.0
    } else {
        0.0
    };

    pipeline
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn deal(talent: Option<Uuid>, client: Option<Uuid>, cents: i64, date: &str) -> Deal {
        Deal {
            id: Uuid::new_v4(),
            talent_id: talent,
            client_id: client,
            commission_amount: cents,
            deal_date: date.parse().expect("data de teste válida"),
            created_at: Utc::now(),
        }
    }

    fn quote(status: QuoteStatus, cents: i64) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            talent_id: None,
            client_id: None,
            status,
            total_amount: cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn aggregates_deals_for_one_talent() {
        let talent = Uuid::new_v4();
        let deals = vec![
            deal(Some(talent), None, 500, "2025-01-10"),
            deal(Some(talent), None, 1500, "2025-01-20"),
        ];

        let stats = talent_revenue_stats(&deals, talent);
        assert_eq!(stats.total_revenue, 2000);
        assert_eq!(stats.deal_count, 2);
        assert_eq!(stats.avg_deal_size, 1000);
        assert_eq!(stats.last_deal_date, Some("2025-01-20".parse().unwrap()));
    }

    #[test]
    fn talent_without_deals_has_zeroed_stats() {
        let other = Uuid::new_v4();
        let deals = vec![deal(Some(Uuid::new_v4()), None, 900, "2025-03-01")];

        let stats = talent_revenue_stats(&deals, other);
        assert_eq!(stats.deal_count, 0);
        assert_eq!(stats.avg_deal_size, 0);
        assert_eq!(stats.last_deal_date, None);
    }

    #[test]
    fn deals_without_talent_are_skipped_in_talent_grouping() {
        let talent = Uuid::new_v4();
        let deals = vec![
            deal(Some(talent), None, 100, "2025-02-01"),
            deal(None, None, 9999, "2025-02-02"),
        ];

        let rows = revenue_by_talent(&deals);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stats.total_revenue, 100);
    }

    #[test]
    fn revenue_by_client_sorts_by_total_desc() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let deals = vec![
            deal(None, Some(a), 100, "2025-01-01"),
            deal(None, Some(b), 300, "2025-01-02"),
            deal(None, Some(a), 100, "2025-01-03"),
        ];

        let rows = revenue_by_client(&deals);
        assert_eq!(rows[0].client_id, b);
        assert_eq!(rows[0].stats.total_revenue, 300);
        assert_eq!(rows[1].stats.deal_count, 2);
    }

    #[test]
    fn monthly_series_has_twelve_gap_free_entries() {
        let today: NaiveDate = "2025-06-15".parse().unwrap();
        let deals = vec![
            deal(None, None, 1000, "2025-06-01"),
            deal(None, None, 2000, "2024-12-25"),
            // Fora da janela de 12 meses: ignorado
            deal(None, None, 7777, "2023-01-01"),
        ];

        let series = monthly_series(&deals, today);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "2024-07");
        assert_eq!(series[11].month, "2025-06");
        assert_eq!(series[11].total_revenue, 1000);

        let december = series.iter().find(|m| m.month == "2024-12").unwrap();
        assert_eq!(december.total_revenue, 2000);

        // Meses sem deal continuam presentes, zerados
        let empty = series.iter().filter(|m| m.deal_count == 0).count();
        assert_eq!(empty, 10);
    }

    #[test]
    fn monthly_series_crosses_year_boundary_in_order() {
        let today: NaiveDate = "2025-02-10".parse().unwrap();
        let series = monthly_series(&[], today);
        assert_eq!(series[0].month, "2024-03");
        assert_eq!(series[9].month, "2024-12");
        assert_eq!(series[10].month, "2025-01");
        assert_eq!(series[11].month, "2025-02");
    }

    #[test]
    fn summary_windows_are_calendar_aligned() {
        let today: NaiveDate = "2025-05-20".parse().unwrap();
        let deals = vec![
            deal(None, None, 100, "2025-05-01"),  // este mês (e este trimestre)
            deal(None, None, 200, "2025-05-31"),  // fim inclusivo do mês
            deal(None, None, 400, "2025-04-30"),  // mês passado, mesmo trimestre
            deal(None, None, 800, "2025-03-31"),  // trimestre passado
            deal(None, None, 1600, "2024-12-31"), // fora de tudo
        ];

        let summary = summarize(&deals, today);
        assert_eq!(summary.this_month, 300);
        assert_eq!(summary.last_month, 400);
        assert_eq!(summary.this_quarter, 700);
        assert_eq!(summary.last_quarter, 800);
        assert_eq!(summary.total_revenue, 3100);
        assert_eq!(summary.deal_count, 5);
        assert_eq!(summary.avg_deal_size, 620);
    }

    #[test]
    fn quarter_bounds_cross_year_backwards() {
        let today: NaiveDate = "2025-01-15".parse().unwrap();
        let (tq_start, tq_end) = quarter_bounds(today);
        assert_eq!(tq_start, "2025-01-01".parse::<NaiveDate>().unwrap());
        assert_eq!(tq_end, "2025-03-31".parse::<NaiveDate>().unwrap());

        let prev_ref = tq_start.pred_opt().unwrap();
        let (lq_start, lq_end) = quarter_bounds(prev_ref);
        assert_eq!(lq_start, "2024-10-01".parse::<NaiveDate>().unwrap());
        assert_eq!(lq_end, "2024-12-31".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn empty_deals_summary_is_all_zero() {
        let summary = summarize(&[], "2025-07-01".parse().unwrap());
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.deal_count, 0);
        assert_eq!(summary.avg_deal_size, 0);
        assert_eq!(summary.this_month, 0);
    }

    #[test]
    fn pipeline_buckets_count_and_value() {
        let quotes = vec![
            quote(QuoteStatus::Draft, 100),
            quote(QuoteStatus::Draft, 100),
            quote(QuoteStatus::Draft, 100),
            quote(QuoteStatus::Sent, 500),
        ];

        let pipeline = quote_pipeline(&quotes);
        assert_eq!(pipeline.draft, PipelineBucket { count: 3, value: 300 });
        assert_eq!(pipeline.sent, PipelineBucket { count: 1, value: 500 });
        assert_eq!(pipeline.accepted.count, 0);
        assert_eq!(pipeline.win_rate, 0.0);
    }

    #[test]
    fn win_rate_is_bounded_percentage() {
        let quotes = vec![
            quote(QuoteStatus::Accepted, 1000),
            quote(QuoteStatus::Accepted, 1000),
            quote(QuoteStatus::Rejected, 500),
            quote(QuoteStatus::Sent, 999),
            quote(QuoteStatus::Expired, 999),
        ];

        let pipeline = quote_pipeline(&quotes);
        assert!((pipeline.win_rate - 66.66666666666667).abs() < 1e-9);
        assert!(pipeline.win_rate >= 0.0 && pipeline.win_rate <= 100.0);
    }

    #[test]
    fn win_rate_zero_without_closed_quotes() {
        let quotes = vec![quote(QuoteStatus::Draft, 100), quote(QuoteStatus::Sent, 200)];
        assert_eq!(quote_pipeline(&quotes).win_rate, 0.0);
    }
}
