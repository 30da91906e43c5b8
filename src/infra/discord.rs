//! Discord webhook notifications.
//!
//! Order completions and weapon registry changes are mirrored to a
//! Discord channel when `DISCORD_WEBHOOK_URL` is set. Delivery is
//! best-effort: failures are logged and never fail the primary
//! operation.

use chrono::Utc;
use serde_json::{json, Value};

/// What happened to a weapon, for the audit embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponAction {
    Created,
    Updated,
    Deleted,
}

impl WeaponAction {
    fn title(self) -> &'static str {
        match self {
            Self::Created => "Nouvelle arme créée",
            Self::Updated => "Arme modifiée",
            Self::Deleted => "Arme supprimée",
        }
    }

    fn color(self) -> u32 {
        match self {
            Self::Created => 0x2ECC71,
            Self::Updated => 0xF39C12,
            Self::Deleted => 0xE74C3C,
        }
    }
}

/// A line item for the order-completed embed.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

impl DiscordNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Announce a completed order with its line items and totals.
    pub async fn notify_order_completed(
        &self,
        username: &str,
        items: &[OrderLine],
        total: i64,
        profit: i64,
    ) {
        let summary = if items.is_empty() {
            "Aucun détail disponible".to_string()
        } else {
            items
                .iter()
                .map(|item| format!("- {}x {}", item.quantity, item.name))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let payload = json!({
            "username": "Armurerie Bot",
            "embeds": [{
                "title": "Nouvelle commande validée",
                "description": format!("Une commande a été validée par {username}"),
                "color": 0x2ECC71,
                "timestamp": Utc::now().to_rfc3339(),
                "fields": [
                    { "name": "Détails de la commande", "value": summary },
                    { "name": "Total", "value": format_cents(total), "inline": true },
                    { "name": "Profit", "value": format_cents(profit), "inline": true },
                ],
                "footer": { "text": "Système d'Armurerie" },
            }],
        });

        self.post(payload).await;
    }

    /// Mirror a weapon create/update/delete to the audit channel.
    pub async fn log_weapon_event(
        &self,
        action: WeaponAction,
        username: &str,
        weapon_name: &str,
        price: i32,
        production_cost: i32,
    ) {
        let payload = json!({
            "username": "Système d'Armurerie",
            "embeds": [{
                "title": action.title(),
                "description": format!("Action effectuée par {username}"),
                "color": action.color(),
                "timestamp": Utc::now().to_rfc3339(),
                "fields": [
                    { "name": "Nom", "value": weapon_name, "inline": true },
                    { "name": "Prix", "value": format_cents(i64::from(price)), "inline": true },
                    {
                        "name": "Bénéfice",
                        "value": format_cents(i64::from(price) - i64::from(production_cost)),
                        "inline": true,
                    },
                ],
                "footer": { "text": "Système de logs d'armes" },
            }],
        });

        self.post(payload).await;
    }

    async fn post(&self, payload: Value) {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::debug!("DISCORD_WEBHOOK_URL not configured, skipping notification");
            return;
        };

        match self.client.post(url).json(&payload).send().await {
            Ok(response) if !response.status().is_success() => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(%status, %body, "Discord webhook rejected notification");
            }
            Ok(_) => {
                tracing::debug!("Discord notification delivered");
            }
            Err(e) => {
                tracing::error!("Failed to reach Discord webhook: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cents_as_dollars() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(150_000), "$1500.00");
        assert_eq!(format_cents(99), "$0.99");
        assert_eq!(format_cents(101), "$1.01");
    }

    #[test]
    fn action_colors_are_distinct() {
        assert_ne!(WeaponAction::Created.color(), WeaponAction::Updated.color());
        assert_ne!(WeaponAction::Updated.color(), WeaponAction::Deleted.color());
    }
}
