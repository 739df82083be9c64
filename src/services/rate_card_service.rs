// src/services/rate_card_service.rs

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{AddonRule, Deliverable, RateCard, RateCardEntry},
};

#[derive(Clone)]
pub struct RateCardService {
    repo: CatalogRepository,
}

impl RateCardService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_deliverables(&self) -> Result<Vec<Deliverable>, AppError> {
        self.repo.list_deliverables().await
    }

    /// Regras de add-on como lookup base -> [add-ons permitidos]
    pub async fn addon_rules(&self) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
        let rules = self.repo.list_addon_rules().await?;
        Ok(group_addon_rules(&rules))
    }

    /// O rate card de um talento: lista canônica + visões derivadas
    pub async fn rate_card(&self, talent_id: Uuid) -> Result<RateCard, AppError> {
        let entries = self.repo.list_rate_card_entries(talent_id).await?;
        Ok(assemble_rate_card(talent_id, entries))
    }

    /// Lookup em massa: talento -> entregável -> preço em centavos.
    /// Uma query só; talentos sem rate simplesmente não aparecem no mapa.
    pub async fn rates_by_talent(&self) -> Result<HashMap<Uuid, HashMap<Uuid, i64>>, AppError> {
        let entries = self.repo.list_all_rate_card_entries().await?;
        let mut lookup: HashMap<Uuid, HashMap<Uuid, i64>> = HashMap::new();
        for entry in entries {
            lookup
                .entry(entry.talent_id)
                .or_default()
                .insert(entry.deliverable_id, entry.base_rate);
        }
        Ok(lookup)
    }

    /// Reconciliação do rate card: monta o plano e aplica numa transação.
    /// Devolve o card já remontado, para o chamador não ler estado velho.
    pub async fn save_rates(
        &self,
        talent_id: Uuid,
        rates: &HashMap<Uuid, i64>,
    ) -> Result<RateCard, AppError> {
        let (upserts, deletes) = partition_rate_actions(rates);
        self.repo.apply_rate_plan(talent_id, &upserts, &deletes).await?;
        self.rate_card(talent_id).await
    }
}

// =============================================================================
//  MONTAGEM PURA DO RATE CARD
// =============================================================================

/// Particiona a lista plana em visões derivadas. As visões saem todas da
/// mesma lista de entrada, então não têm como divergir entre si.
pub fn assemble_rate_card(talent_id: Uuid, mut entries: Vec<RateCardEntry>) -> RateCard {
    // A lista canônica só contém valores positivos; o SELECT já garante isso,
    // mas a montagem não confia no chamador.
    entries.retain(|e| e.base_rate > 0);
    entries.sort_by_key(|e| e.display_order);

    let main: Vec<RateCardEntry> = entries.iter().filter(|e| !e.is_addon).cloned().collect();
    let addons: Vec<RateCardEntry> = entries.iter().filter(|e| e.is_addon).cloned().collect();

    let mut by_category: BTreeMap<String, Vec<RateCardEntry>> = BTreeMap::new();
    for entry in &entries {
        let category = entry.category.clone().unwrap_or_else(|| "outros".to_string());
        by_category.entry(category).or_default().push(entry.clone());
    }

    RateCard { talent_id, entries, main, addons, by_category }
}

/// Divide o mapa enviado em upserts (centavos > 0) e remoções (<= 0).
/// O plano depende só do mapa, então enviar o mesmo mapa duas vezes
/// produz o mesmo plano e, aplicado, o mesmo conjunto de linhas.
pub fn partition_rate_actions(rates: &HashMap<Uuid, i64>) -> (Vec<(Uuid, i64)>, Vec<Uuid>) {
    let mut upserts = Vec::new();
    let mut deletes = Vec::new();
    for (&deliverable_id, &cents) in rates {
        if cents > 0 {
            upserts.push((deliverable_id, cents));
        } else {
            deletes.push(deliverable_id);
        }
    }
    (upserts, deletes)
}

pub fn group_addon_rules(rules: &[AddonRule]) -> HashMap<Uuid, Vec<Uuid>> {
    let mut lookup: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for rule in rules {
        lookup
            .entry(rule.base_deliverable_id)
            .or_default()
            .push(rule.addon_deliverable_id);
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::social::SocialPlatform;

    fn entry(cents: i64, order: i32, is_addon: bool, category: Option<&str>) -> RateCardEntry {
        RateCardEntry {
            talent_id: Uuid::nil(),
            deliverable_id: Uuid::new_v4(),
            base_rate: cents,
            name: "Post".to_string(),
            platform: SocialPlatform::Instagram,
            category: category.map(str::to_string),
            display_order: order,
            is_addon,
            addon_type: None,
        }
    }

    #[test]
    fn assembles_sorted_and_partitioned_card() {
        let entries = vec![
            entry(5000, 2, true, Some("stories")),
            entry(2500, 1, false, Some("feed")),
            entry(10000, 3, false, Some("feed")),
        ];

        let card = assemble_rate_card(Uuid::nil(), entries);

        assert_eq!(card.entries.len(), 3);
        assert_eq!(card.entries[0].display_order, 1);
        assert_eq!(card.main.len(), 2);
        assert_eq!(card.addons.len(), 1);
        assert_eq!(card.by_category["feed"].len(), 2);
        assert_eq!(card.by_category["stories"].len(), 1);
    }

    #[test]
    fn non_positive_rates_never_reach_the_card() {
        let entries = vec![entry(0, 1, false, None), entry(-100, 2, false, None), entry(300, 3, false, None)];

        let card = assemble_rate_card(Uuid::nil(), entries);
        assert_eq!(card.entries.len(), 1);
        assert_eq!(card.entries[0].base_rate, 300);
    }

    #[test]
    fn derived_views_cover_the_whole_flat_list() {
        let entries = vec![
            entry(100, 1, false, Some("feed")),
            entry(200, 2, true, Some("feed")),
            entry(300, 3, true, None),
        ];

        let card = assemble_rate_card(Uuid::nil(), entries);
        assert_eq!(card.main.len() + card.addons.len(), card.entries.len());
        let grouped: usize = card.by_category.values().map(Vec::len).sum();
        assert_eq!(grouped, card.entries.len());
    }

    #[test]
    fn rate_body_is_a_bare_json_map() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"{}": 250000, "{}": 0}}"#, id, Uuid::new_v4());

        // O corpo do PUT é o mapa direto, sem envelope
        let rates: HashMap<Uuid, i64> = serde_json::from_str(&body).unwrap();
        assert_eq!(rates[&id], 250_000);

        let (upserts, deletes) = partition_rate_actions(&rates);
        assert_eq!(upserts, vec![(id, 250_000)]);
        assert_eq!(deletes.len(), 1);
    }

    #[test]
    fn rate_plan_splits_upserts_and_deletes() {
        let keep = Uuid::new_v4();
        let drop_zero = Uuid::new_v4();
        let drop_negative = Uuid::new_v4();
        let rates = HashMap::from([(keep, 250_000), (drop_zero, 0), (drop_negative, -50)]);

        let (upserts, mut deletes) = partition_rate_actions(&rates);
        deletes.sort();

        assert_eq!(upserts, vec![(keep, 250_000)]);
        let mut expected = vec![drop_zero, drop_negative];
        expected.sort();
        assert_eq!(deletes, expected);

        // O mesmo mapa gera sempre o mesmo plano
        let (again, _) = partition_rate_actions(&rates);
        assert_eq!(again, upserts);
    }

    #[test]
    fn addon_rules_group_by_base() {
        let base = Uuid::new_v4();
        let a1 = Uuid::new_v4();
        let a2 = Uuid::new_v4();
        let rules = vec![
            AddonRule { base_deliverable_id: base, addon_deliverable_id: a1 },
            AddonRule { base_deliverable_id: base, addon_deliverable_id: a2 },
        ];

        let lookup = group_addon_rules(&rules);
        assert_eq!(lookup[&base], vec![a1, a2]);
        assert!(lookup.get(&a1).is_none());
    }
}
