// src/models/social.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE social_platform do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "social_platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Tiktok,
    Youtube,
    Twitch,
    Linkedin,
    Twitter,
    Facebook,
    Other,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Twitch => "twitch",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Other => "other",
        }
    }

    // Monta a URL pública do perfil a partir do handle (já sem '@').
    // Plataformas desconhecidas não têm URL derivável.
    pub fn profile_url(&self, handle: &str) -> Option<String> {
        let url = match self {
            SocialPlatform::Instagram => format!("https://instagram.com/{}", handle),
            SocialPlatform::Tiktok => format!("https://tiktok.com/@{}", handle),
            SocialPlatform::Youtube => format!("https://youtube.com/@{}", handle),
            SocialPlatform::Twitch => format!("https://twitch.tv/{}", handle),
            SocialPlatform::Linkedin => format!("https://linkedin.com/in/{}", handle),
            SocialPlatform::Twitter => format!("https://x.com/{}", handle),
            SocialPlatform::Facebook => format!("https://facebook.com/{}", handle),
            SocialPlatform::Other => return None,
        };
        Some(url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccount {
    pub id: Uuid,
    pub talent_id: Uuid,
    pub platform: SocialPlatform,

    // Invariante: nunca armazenado com '@' inicial
    pub handle: String,

    pub follower_count: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Conta + URL de perfil derivada (a URL nunca é persistida)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccountView {
    #[serde(flatten)]
    #[schema(inline)]
    pub account: SocialAccount,
    pub profile_url: Option<String>,
}

impl From<SocialAccount> for SocialAccountView {
    fn from(account: SocialAccount) -> Self {
        let profile_url = account.platform.profile_url(&account.handle);
        Self { account, profile_url }
    }
}
