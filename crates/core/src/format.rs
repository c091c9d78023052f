use crate::config::BroadcastConfig;
use pandabroadcast_text::{Markup, to_legacy};

pub const SERVERS_PLACEHOLDER: &str = "%servers%";

fn color(config: &BroadcastConfig, markup: &str) -> String {
    if config.use_legacy_colors {
        to_legacy(markup)
    } else {
        markup.to_string()
    }
}

/// `prefix-color prefix title-color title prefix-color suffix message-color message`
pub fn format_base(config: &BroadcastConfig, message: &str) -> String {
    let mut out = String::new();
    out += &color(config, &config.prefix_color);
    out += &config.prefix;
    out += &color(config, &config.title_color);
    out += &config.title;
    out += &color(config, &config.prefix_color);
    out += &config.suffix;
    out += &color(config, &config.message_color);
    out += message;
    out
}

/// The base message followed by the rendered scope format. Same as
/// [`format_base`] when the scope is disabled or there are no targets.
pub fn format_scoped(config: &BroadcastConfig, message: &str, target_names: &[String]) -> String {
    let base = format_base(config, message);
    if !config.show_server_scope || target_names.is_empty() {
        return base;
    }

    let scope = config
        .scope_format
        .replace(SERVERS_PLACEHOLDER, &target_names.join(", "));
    format!("{} {}", base, color(config, &scope))
}

/// Both variants of one broadcast, in the dialect the config selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub base: String,
    pub scoped: String,
    legacy: bool,
}

impl FormattedMessage {
    pub fn new(config: &BroadcastConfig, message: &str, target_names: &[String]) -> Self {
        let base = format_base(config, message);
        let scoped = if config.show_server_scope {
            format_scoped(config, message, target_names)
        } else {
            base.clone()
        };
        FormattedMessage {
            base,
            scoped,
            legacy: config.use_legacy_colors,
        }
    }

    pub fn select(&self, show_scope: bool) -> Markup {
        let text = if show_scope { &self.scoped } else { &self.base };
        if self.legacy {
            Markup::legacy(text.as_str())
        } else {
            Markup::tag(text.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn base_in_tag_markup() {
        let config = BroadcastConfig::default();
        assert_eq!(
            format_base(&config, "Server restart soon"),
            "<gold>» <yellow>Broadcast<gold> « <gray>Server restart soon"
        );
    }

    #[test]
    fn base_in_legacy_markup() {
        let config = BroadcastConfig {
            use_legacy_colors: true,
            ..Default::default()
        };
        let base = format_base(&config, "hi <gold>");
        assert!(base.starts_with("&6"));
        // The message body is not converted.
        assert_eq!(base, "&6» &eBroadcast&6 « &7hi <gold>");
    }

    #[test]
    fn scoped_appends_server_list() {
        let config = BroadcastConfig::default();
        let scoped = format_scoped(&config, "hi", &names(&["lobby", "pvp"]));
        assert_eq!(
            scoped,
            "<gold>» <yellow>Broadcast<gold> « <gray>hi <gray>(Sent to: lobby, pvp)"
        );

        let config = BroadcastConfig {
            use_legacy_colors: true,
            ..Default::default()
        };
        let scoped = format_scoped(&config, "hi", &names(&["lobby", "pvp"]));
        assert!(scoped.ends_with(" &7(Sent to: lobby, pvp)"));
    }

    #[test]
    fn scoped_is_base_without_scope() {
        let config = BroadcastConfig {
            show_server_scope: false,
            ..Default::default()
        };
        let targets = names(&["lobby"]);
        assert_eq!(
            format_scoped(&config, "hi", &targets),
            format_base(&config, "hi")
        );
        let formatted = FormattedMessage::new(&config, "hi", &targets);
        assert_eq!(formatted.base, formatted.scoped);
    }

    #[test]
    fn scoped_is_base_without_targets() {
        let config = BroadcastConfig::default();
        assert_eq!(format_scoped(&config, "hi", &[]), format_base(&config, "hi"));
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let config = BroadcastConfig {
            scope_format: "%count% on %servers% %servers%".to_string(),
            ..Default::default()
        };
        let scoped = format_scoped(&config, "", &names(&["a"]));
        assert!(scoped.ends_with(" %count% on a a"));
    }

    #[test]
    fn select_uses_config_dialect() {
        let config = BroadcastConfig {
            use_legacy_colors: true,
            ..Default::default()
        };
        let formatted = FormattedMessage::new(&config, "hi", &names(&["lobby"]));
        assert!(formatted.select(true).is_legacy());
        assert_eq!(formatted.select(false).as_str(), formatted.base);
        assert_eq!(formatted.select(true).as_str(), formatted.scoped);

        let formatted = FormattedMessage::new(&BroadcastConfig::default(), "hi", &[]);
        assert!(!formatted.select(true).is_legacy());
    }
}
