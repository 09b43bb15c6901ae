//! Environment heuristics: desktop vs mobile browser
//!
//! Signals are gathered by the host (see `wasm::browser_signals`) and passed in,
//! so every heuristic here is a pure function. `None` means no window/navigator
//! (server-side render) and always resolves to desktop.
//!
//! 1. User agent matches a known mobile pattern (primary)
//! 2. Touch capability AND viewport width <= 768 (secondary; avoids flagging
//!    touch laptops or small non-touch windows)

use super::WalletPolicy;
use crate::core::defaults;
use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|Windows Phone|Opera Mini|IEMobile|Mobile Safari|mobile")
        .expect("mobile user agent regex")
});
static IOS_USER_AGENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)iPhone|iPad|iPod").expect("ios regex"));
static ANDROID_USER_AGENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Android").expect("android regex"));

/// Browser signals relevant to the mobile heuristic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentSignals {
    pub user_agent: String,
    pub max_touch_points: u32,
    /// Legacy IE counter
    pub ms_max_touch_points: u32,
    /// `'ontouchstart' in window`
    pub has_touch_start: bool,
    /// `'ontouchend' in document`
    pub has_touch_end: bool,
    pub inner_width: f64,
}

impl EnvironmentSignals {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into(), inner_width: 1920.0, ..Default::default() }
    }
    pub fn with_touch_points(mut self, points: u32) -> Self { self.max_touch_points = points; self }
    pub fn with_touch_events(mut self) -> Self { self.has_touch_start = true; self.has_touch_end = true; self }
    pub fn with_width(mut self, width: f64) -> Self { self.inner_width = width; self }

    pub fn has_touch(&self) -> bool {
        self.has_touch_start || self.max_touch_points > 0 || self.ms_max_touch_points > 0
    }
}

pub fn is_mobile(signals: Option<&EnvironmentSignals>) -> bool {
    let Some(env) = signals else { return false };
    if MOBILE_USER_AGENT.is_match(&env.user_agent) {
        return true;
    }
    env.has_touch() && env.inner_width <= defaults::MOBILE_MAX_WIDTH
}

/// iPhone/iPad/iPod, or iPadOS 13+ which reports itself as a Mac.
pub fn is_ios(signals: Option<&EnvironmentSignals>) -> bool {
    let Some(env) = signals else { return false };
    let ipados = env.user_agent.contains("Mac") && env.has_touch_end && env.max_touch_points > 1;
    IOS_USER_AGENT.is_match(&env.user_agent) || ipados
}

pub fn is_android(signals: Option<&EnvironmentSignals>) -> bool {
    signals.map_or(false, |env| ANDROID_USER_AGENT.is_match(&env.user_agent))
}

/// Mobile browsers cannot host extensions, so injected wallets are unlikely.
/// Conservative on every mobile platform, not only iOS.
pub fn wallet_extensions_unavailable(signals: Option<&EnvironmentSignals>) -> bool {
    is_mobile(signals)
}

/// Explicit flag wins; otherwise infer from the environment.
pub fn resolve_policy(explicit_mobile: Option<bool>, signals: Option<&EnvironmentSignals>) -> WalletPolicy {
    WalletPolicy::from_mobile_flag(explicit_mobile.unwrap_or_else(|| is_mobile(signals)))
}
