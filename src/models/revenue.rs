// src/models/revenue.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

// --- DADOS BRUTOS (somente leitura nesta API) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub talent_id: Option<Uuid>,
    pub client_id: Option<Uuid>,

    // Comissão da agência, em centavos
    pub commission_amount: i64,
    pub deal_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub talent_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub status: QuoteStatus,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

// --- AGREGADOS (calculados em memória pelo revenue_service) ---

// Acumulador por grupo (talento, cliente ou mês)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueGroup {
    pub deal_count: i64,
    pub total_revenue: i64,
    pub avg_deal_size: i64,
    pub last_deal_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalentRevenue {
    pub talent_id: Uuid,
    #[serde(flatten)]
    #[schema(inline)]
    pub stats: RevenueGroup,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenue {
    pub client_id: Uuid,
    #[serde(flatten)]
    #[schema(inline)]
    pub stats: RevenueGroup,
}

// Um mês da série temporal ("2025-01"), sempre presente mesmo zerado
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub deal_count: i64,
    pub total_revenue: i64,
}

// Janelas de calendário do resumo do dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total_revenue: i64,
    pub deal_count: i64,
    pub avg_deal_size: i64,

    pub this_month: i64,
    pub last_month: i64,
    pub this_quarter: i64,
    pub last_quarter: i64,
}

// --- PIPELINE DE ORÇAMENTOS ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineBucket {
    pub count: i64,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotePipeline {
    pub draft: PipelineBucket,
    pub sent: PipelineBucket,
    pub accepted: PipelineBucket,
    pub rejected: PipelineBucket,
    pub expired: PipelineBucket,

    // accepted / (accepted + rejected), em porcentagem [0, 100]
    pub win_rate: f64,
}
