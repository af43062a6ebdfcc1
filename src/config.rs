//! User configuration: keybindings, interaction tuning and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::strip::DEFAULT_DRAG_SPEED;
use crate::core::visibility::DEFAULT_THRESHOLD;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    StripPrev,
    StripNext,
    FocusNextStrip,
    BackToTop,
    JumpWorks,
    JumpStack,
    JumpContact,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::StripPrev,
        Action::StripNext,
        Action::FocusNextStrip,
        Action::BackToTop,
        Action::JumpWorks,
        Action::JumpStack,
        Action::JumpContact,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::StripPrev => "strip_prev",
            Action::StripNext => "strip_next",
            Action::FocusNextStrip => "focus_next_strip",
            Action::BackToTop => "back_to_top",
            Action::JumpWorks => "jump_works",
            Action::JumpStack => "jump_stack",
            Action::JumpContact => "jump_contact",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    /// For characters SHIFT is already folded into the case, so it is ignored
    /// there too: `L` matches `Char('L')` whether or not SHIFT is reported.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), key_name(self.code))
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the typed case for single characters.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and interaction tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Content travel per unit of pointer travel while dragging a strip.
    pub drag_speed: f64,
    /// Page offset (logical units) past which "back to top" appears.
    pub back_to_top_threshold: f64,
    /// Dead zone around the threshold to stop the button flickering.
    pub threshold_hysteresis: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            drag_speed: DEFAULT_DRAG_SPEED,
            back_to_top_threshold: DEFAULT_THRESHOLD,
            threshold_hysteresis: 0.0,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        let n = KeyModifiers::NONE;
        let bind = |code| KeyBind::new(code, n);
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![bind(KeyCode::Up), bind(KeyCode::Char('k'))]);
        m.insert(ScrollDown, vec![bind(KeyCode::Down), bind(KeyCode::Char('j'))]);
        m.insert(PageUp, vec![bind(KeyCode::PageUp)]);
        m.insert(PageDown, vec![bind(KeyCode::PageDown), bind(KeyCode::Char(' '))]);
        m.insert(StripPrev, vec![bind(KeyCode::Left), bind(KeyCode::Char('h'))]);
        m.insert(StripNext, vec![bind(KeyCode::Right), bind(KeyCode::Char('l'))]);
        m.insert(FocusNextStrip, vec![bind(KeyCode::Tab)]);
        m.insert(BackToTop, vec![bind(KeyCode::Home), bind(KeyCode::Char('t'))]);
        m.insert(JumpWorks, vec![bind(KeyCode::Char('1'))]);
        m.insert(JumpStack, vec![bind(KeyCode::Char('2'))]);
        m.insert(JumpContact, vec![bind(KeyCode::Char('3'))]);
        m.insert(Quit, vec![bind(KeyCode::Char('q')), bind(KeyCode::Esc)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: screenshots | {}: next strip | {}/{}/{}: sections | {}: top | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::StripPrev),
            self.short_binding(Action::StripNext),
            self.short_binding(Action::FocusNextStrip),
            self.short_binding(Action::JumpWorks),
            self.short_binding(Action::JumpStack),
            self.short_binding(Action::JumpContact),
            self.short_binding(Action::BackToTop),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) => {
                if path.exists() {
                    tracing::warn!("cannot read {}: {e}; using defaults", path.display());
                }
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Interaction settings.
            match key {
                "drag_speed" => {
                    if let Some(v) = parse_tuning(key, value, 0.2, 5.0) {
                        config.drag_speed = v;
                    }
                    continue;
                }
                "back_to_top_threshold" => {
                    if let Some(v) = parse_tuning(key, value, 100.0, 2000.0) {
                        config.back_to_top_threshold = v;
                    }
                    continue;
                }
                "threshold_hysteresis" => {
                    if let Some(v) = parse_tuning(key, value, 0.0, 64.0) {
                        config.threshold_hysteresis = v;
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key {key:?}");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.add_bindings(action, parsed);
            }
        }

        config
    }

    /// Bind `binds` to `action`, taking each key away from whatever action
    /// held it before so every key resolves to exactly one action.
    fn add_bindings(&mut self, action: Action, binds: Vec<KeyBind>) {
        for (&other, existing) in self.bindings.iter_mut() {
            if other != action {
                existing.retain(|b| !binds.contains(b));
            }
        }
        self.bindings.insert(action, binds);
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Interaction".to_string(),
            format!("drag_speed = {}", self.drag_speed),
            format!("back_to_top_threshold = {}", self.back_to_top_threshold),
            format!("threshold_hysteresis = {}", self.threshold_hysteresis),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Parse a finite number and clamp it into `lo..=hi`.  Anything else
/// (including `nan` and `inf`) leaves the default in place.
fn parse_tuning(key: &str, value: &str, lo: f64, hi: f64) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v.clamp(lo, hi)),
        _ => {
            tracing::warn!("ignoring {key} = {value:?}: expected a number");
            None
        }
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_arrow_keys() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Right, KeyModifiers::NONE)), Some(Action::StripNext));
        assert_eq!(config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_reads_tuning_and_bindings() {
        let config = AppConfig::parse_config(
            "# comment\n\
             drag_speed = 2.5\n\
             back_to_top_threshold = 320\n\
             threshold_hysteresis = 500\n\
             strip_next = Ctrl+n, \"L\"\n\
             bogus = x\n",
        );
        assert_eq!(config.drag_speed, 2.5);
        assert_eq!(config.back_to_top_threshold, 320.0);
        assert_eq!(config.threshold_hysteresis, 64.0);
        assert_eq!(
            config.bindings[&Action::StripNext],
            vec![
                KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Char('L'), KeyModifiers::NONE),
            ]
        );
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = AppConfig::parse_config("drag_speed = fast\nquit = Hyper+q\n");
        assert_eq!(config.drag_speed, DEFAULT_DRAG_SPEED);
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn non_finite_tuning_values_are_ignored() {
        let config = AppConfig::parse_config(
            "drag_speed = NaN\n\
             back_to_top_threshold = nan\n\
             threshold_hysteresis = inf\n",
        );
        assert_eq!(config.drag_speed, DEFAULT_DRAG_SPEED);
        assert_eq!(config.back_to_top_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.threshold_hysteresis, 0.0);

        let config = AppConfig::parse_config("drag_speed = -inf\nback_to_top_threshold = 1e9\n");
        assert_eq!(config.drag_speed, DEFAULT_DRAG_SPEED);
        assert_eq!(config.back_to_top_threshold, 2000.0);
    }

    #[test]
    fn uppercase_binding_matches_shifted_key() {
        let config = AppConfig::parse_config("strip_next = L\n");
        assert_eq!(config.match_key(key(KeyCode::Char('L'), KeyModifiers::SHIFT)), Some(Action::StripNext));
        assert_eq!(config.match_key(key(KeyCode::Char('L'), KeyModifiers::NONE)), Some(Action::StripNext));
        // Modifier-sensitive keys still compare SHIFT.
        assert_eq!(config.match_key(key(KeyCode::Right, KeyModifiers::SHIFT)), None);
    }

    #[test]
    fn rebinding_a_key_takes_it_from_its_old_action() {
        let config = AppConfig::parse_config("strip_next = j\n");
        for _ in 0..20 {
            assert_eq!(config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::StripNext));
        }
        assert_eq!(config.bindings[&Action::ScrollDown], vec![KeyBind::new(KeyCode::Down, KeyModifiers::NONE)]);
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = std::env::temp_dir().join(format!("folio-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.drag_speed = 1.5;
        config.threshold_hysteresis = 8.0;
        config
            .bindings
            .insert(Action::BackToTop, vec![KeyBind::new(KeyCode::F(5), KeyModifiers::SHIFT)]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.drag_speed, 1.5);
        assert_eq!(loaded.threshold_hysteresis, 8.0);
        assert_eq!(loaded.bindings, config.bindings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/folio/config.toml"));
        assert_eq!(loaded.back_to_top_threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn display_uses_arrows() {
        assert_eq!(KeyBind::new(KeyCode::Up, KeyModifiers::ALT).display(), "Alt+↑");
        assert_eq!(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE).display(), "Space");
    }
}
