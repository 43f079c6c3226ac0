//! Markup contract, timings and user-facing texts of the site.
//!
//! Every field has a default matching the production page, so an empty JSON object is a
//! valid configuration and partial documents only override what they name.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub nav_menu: NavMenuConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub scroll_spy: ScrollSpyConfig,
    pub active_menu: ActiveMenuConfig,
    pub scroll_to_top: ScrollToTopConfig,
    pub forms: FormConfig,
    pub toast: ToastConfig,
    pub accordion: AccordionConfig,
    pub count_up: CountUpConfig,
    pub modal: ModalConfig,
    pub lazy_load: LazyLoadConfig,
}

impl SiteConfig {
    pub fn from_json(src: &str) -> Result<Self> {
        serde_json::from_str(src).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::Config(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavMenuConfig {
    pub toggle: String,
    pub panel: String,
    pub links: String,
    pub open_class: String,
    pub no_scroll_class: String,
    pub open_max_height: String,
    pub desktop_breakpoint: f64,
    pub resize_debounce_ms: i64,
}

impl Default for NavMenuConfig {
    fn default() -> Self {
        Self {
            toggle: ".navbar-toggler".into(),
            panel: ".navbar-collapse".into(),
            links: ".nav-link".into(),
            open_class: "show".into(),
            no_scroll_class: "u-no-scroll".into(),
            open_max_height: "calc(100vh - var(--header-h))".into(),
            desktop_breakpoint: 1024.0,
            resize_debounce_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub header: String,
    pub fallback_header_offset: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            header: ".l-header".into(),
            fallback_header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    pub sections: String,
    pub links: String,
    pub active_class: String,
    pub lookahead: f64,
    pub throttle_ms: i64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            sections: r#"[id^="section-"]"#.into(),
            links: r##".nav-link[href^="#section-"]"##.into(),
            active_class: "active".into(),
            lookahead: 100.0,
            throttle_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveMenuConfig {
    pub links: String,
    pub active_class: String,
}

impl Default for ActiveMenuConfig {
    fn default() -> Self {
        Self {
            links: ".nav-link".into(),
            active_class: "active".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollToTopConfig {
    pub button_class: String,
    pub label: String,
    pub threshold: f64,
    pub throttle_ms: i64,
}

impl Default for ScrollToTopConfig {
    fn default() -> Self {
        Self {
            button_class: "c-scroll-to-top".into(),
            label: "Nach oben scrollen".into(),
            threshold: 300.0,
            throttle_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub forms: String,
    pub fields: String,
    pub group: String,
    pub error_text: String,
    pub error_class: String,
    pub submit: String,
    pub submit_delay_ms: i64,
    pub redirect_to: String,
    pub loading_label: String,
    pub messages: ValidationMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            forms: r#".c-form, .c-contact-form, form[class*="form"]"#.into(),
            fields: "input, textarea, select".into(),
            group: ".c-form__group".into(),
            error_text: ".c-form__error".into(),
            error_class: "has-error".into(),
            submit: r#"button[type="submit"]"#.into(),
            submit_delay_ms: 1500,
            redirect_to: "/thank_you.html".into(),
            loading_label: "Wird gesendet...".into(),
            messages: ValidationMessages::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub too_short: String,
    pub must_accept: String,
    pub form_invalid: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            required: "Dieses Feld ist erforderlich.".into(),
            invalid_email: "Bitte geben Sie eine gültige E-Mail-Adresse ein.".into(),
            invalid_phone: "Bitte geben Sie eine gültige Telefonnummer ein.".into(),
            too_short: "Bitte geben Sie mindestens 10 Zeichen ein.".into(),
            must_accept: "Bitte akzeptieren Sie die Bedingungen.".into(),
            form_invalid: "Bitte korrigieren Sie die markierten Fehler.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub container_id: String,
    pub display_ms: i64,
    pub fade_ms: i64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            container_id: "toast-container".into(),
            display_ms: 5000,
            fade_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub triggers: String,
    pub target_attr: String,
    pub open_class: String,
    pub collapsed_class: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            triggers: ".accordion-button".into(),
            target_attr: "data-bs-target".into(),
            open_class: "show".into(),
            collapsed_class: "collapsed".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountUpConfig {
    pub stats: String,
    pub duration_ms: i64,
    pub stagger_ms: i64,
    pub throttle_ms: i64,
}

impl Default for CountUpConfig {
    fn default() -> Self {
        Self {
            stats: ".c-stat-card__number".into(),
            duration_ms: 2000,
            stagger_ms: 100,
            throttle_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub links: String,
    pub overlay_class: String,
    pub dialog_class: String,
    pub no_scroll_class: String,
    pub close_label: String,
    pub title: String,
    pub body: String,
    pub full_policy_href: String,
    pub full_policy_text: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            links: r#"a[href*="privacy"]"#.into(),
            overlay_class: "c-modal-overlay".into(),
            dialog_class: "c-modal".into(),
            no_scroll_class: "u-no-scroll".into(),
            close_label: "Schließen".into(),
            title: "Datenschutzerklärung".into(),
            body: "Ihre Daten werden vertraulich behandelt und gemäß DSGVO verarbeitet.".into(),
            full_policy_href: "/privacy.html".into(),
            full_policy_text: "Vollständige Datenschutzerklärung anzeigen".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyLoadConfig {
    pub logo_class: String,
    pub critical_attr: String,
    pub hero: String,
}

impl Default for LazyLoadConfig {
    fn default() -> Self {
        Self {
            logo_class: "c-logo__img".into(),
            critical_attr: "data-critical".into(),
            hero: ".c-hero".into(),
        }
    }
}
