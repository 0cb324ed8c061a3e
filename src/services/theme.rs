use crate::services::storage::KeyValueStore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "bem-theme";

/// Frames during which animations stay off after a theme switch.
const TRANSITION_SUPPRESS_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    fn from_os_preference(prefers_dark: Option<bool>) -> Self {
        if prefers_dark.unwrap_or(false) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    /// Only the exact persisted literals are accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl ThemeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            ThemeIcon::Sun => "☀",
            ThemeIcon::Moon => "🌙",
        }
    }
}

/// What the theme toggle and the root surface currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeView {
    pub root_theme: Theme,
    pub icon: ThemeIcon,
    pub icon_alt: &'static str,
    pub aria_pressed: bool,
}

impl ThemeView {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                root_theme: theme,
                icon: ThemeIcon::Sun,
                icon_alt: "Switch to light theme",
                aria_pressed: true,
            },
            Theme::Light => Self {
                root_theme: theme,
                icon: ThemeIcon::Moon,
                icon_alt: "Switch to dark theme",
                aria_pressed: false,
            },
        }
    }
}

pub struct ThemeController {
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    view: ThemeView,
    suppressed_frames: u8,
}

impl ThemeController {
    /// Resolves the initial theme and applies it.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        os_prefers_dark: Option<bool>,
    ) -> Self {
        let storage_key = storage_key.into();
        let initial = resolve_initial_theme(store.as_ref(), &storage_key, os_prefers_dark);
        let mut controller = Self {
            store,
            storage_key,
            view: ThemeView::for_theme(initial),
            suppressed_frames: 0,
        };
        controller.apply_theme(initial);
        controller
    }

    pub fn theme(&self) -> Theme {
        self.view.root_theme
    }

    pub fn view(&self) -> &ThemeView {
        &self.view
    }

    pub fn stored_theme(&self) -> Option<Theme> {
        read_stored_theme(self.store.as_ref(), &self.storage_key)
    }

    /// Returns whether the theme was persisted. Storage failures never block
    /// the switch itself.
    pub fn apply_theme(&mut self, theme: Theme) -> bool {
        self.suppressed_frames = TRANSITION_SUPPRESS_FRAMES;
        self.view = ThemeView::for_theme(theme);

        match self.store.set(&self.storage_key, theme.as_str()) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("theme {theme} not persisted: {err}");
                false
            }
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme().toggled();
        self.apply_theme(next);
        next
    }

    /// Drops the persisted choice and falls back to the OS preference.
    pub fn reset(&mut self, os_prefers_dark: Option<bool>) -> Theme {
        if let Err(err) = self.store.remove(&self.storage_key) {
            log::debug!("stored theme not cleared: {err}");
        }
        let theme = Theme::from_os_preference(os_prefers_dark);
        self.suppressed_frames = TRANSITION_SUPPRESS_FRAMES;
        self.view = ThemeView::for_theme(theme);
        theme
    }

    pub fn transitions_enabled(&self) -> bool {
        self.suppressed_frames == 0
    }

    /// Call once per rendered frame.
    pub fn on_frame(&mut self) {
        self.suppressed_frames = self.suppressed_frames.saturating_sub(1);
    }
}

pub fn resolve_initial_theme(
    store: &dyn KeyValueStore,
    storage_key: &str,
    os_prefers_dark: Option<bool>,
) -> Theme {
    read_stored_theme(store, storage_key)
        .unwrap_or_else(|| Theme::from_os_preference(os_prefers_dark))
}

pub fn read_stored_theme(store: &dyn KeyValueStore, storage_key: &str) -> Option<Theme> {
    match store.get(storage_key) {
        Ok(Some(value)) => value.parse().ok(),
        Ok(None) => None,
        Err(err) => {
            log::debug!("stored theme unreadable: {err}");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::storage::StorageError;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore {
        data: Rc<RefCell<HashMap<String, String>>>,
        fail_reads: Rc<Cell<bool>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl MemoryStore {
        pub(crate) fn with(key: &str, value: &str) -> Self {
            let store = Self::default();
            store.data.borrow_mut().insert(key.into(), value.into());
            store
        }

        pub(crate) fn value(&self, key: &str) -> Option<String> {
            self.data.borrow().get(key).cloned()
        }

        pub(crate) fn fail_reads(&self) {
            self.fail_reads.set(true);
        }

        pub(crate) fn fail_writes(&self) {
            self.fail_writes.set(true);
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.get() {
                return Err(StorageError::Unavailable);
            }
            Ok(self.data.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable);
            }
            self.data.borrow_mut().insert(key.into(), value.into());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable);
            }
            self.data.borrow_mut().remove(key);
            Ok(())
        }
    }

    fn controller(store: &MemoryStore, os_prefers_dark: Option<bool>) -> ThemeController {
        ThemeController::new(Box::new(store.clone()), DEFAULT_STORAGE_KEY, os_prefers_dark)
    }

    #[test]
    fn os_preference_used_when_nothing_stored() {
        let store = MemoryStore::default();
        assert_eq!(controller(&store, Some(true)).theme(), Theme::Dark);
        assert_eq!(controller(&MemoryStore::default(), Some(false)).theme(), Theme::Light);
        assert_eq!(controller(&MemoryStore::default(), None).theme(), Theme::Light);
    }

    #[test]
    fn stored_choice_beats_os_preference() {
        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "light");
        assert_eq!(controller(&store, Some(true)).theme(), Theme::Light);
    }

    #[test]
    fn malformed_stored_value_falls_back_to_os() {
        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "Dark");
        assert_eq!(controller(&store, Some(false)).theme(), Theme::Light);

        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "blue");
        assert_eq!(controller(&store, Some(true)).theme(), Theme::Dark);
    }

    #[test]
    fn unreadable_storage_counts_as_absent() {
        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "light");
        store.fail_reads();
        assert_eq!(controller(&store, Some(true)).theme(), Theme::Dark);
    }

    #[test]
    fn initial_theme_is_persisted() {
        let store = MemoryStore::default();
        controller(&store, Some(true));
        assert_eq!(store.value(DEFAULT_STORAGE_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn toggling_twice_restores_and_repersists() {
        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "light");
        let mut theme = controller(&store, None);

        assert_eq!(theme.toggle(), Theme::Dark);
        assert_eq!(store.value(DEFAULT_STORAGE_KEY).as_deref(), Some("dark"));

        assert_eq!(theme.toggle(), Theme::Light);
        assert_eq!(store.value(DEFAULT_STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn view_tracks_theme() {
        let mut theme = controller(&MemoryStore::default(), Some(false));
        assert_eq!(theme.view().icon, ThemeIcon::Moon);
        assert_eq!(theme.view().icon_alt, "Switch to dark theme");
        assert!(!theme.view().aria_pressed);

        theme.toggle();
        assert_eq!(theme.view().root_theme, Theme::Dark);
        assert_eq!(theme.view().icon, ThemeIcon::Sun);
        assert_eq!(theme.view().icon_alt, "Switch to light theme");
        assert!(theme.view().aria_pressed);
    }

    #[test]
    fn write_failure_does_not_block_switch() {
        let store = MemoryStore::default();
        store.fail_writes();
        let mut theme = controller(&store, Some(false));

        assert!(!theme.apply_theme(Theme::Dark));
        assert_eq!(theme.theme(), Theme::Dark);
        assert!(store.value(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn transitions_resume_after_two_frames() {
        let mut theme = controller(&MemoryStore::default(), None);
        theme.on_frame();
        theme.on_frame();
        assert!(theme.transitions_enabled());

        theme.toggle();
        assert!(!theme.transitions_enabled());
        theme.on_frame();
        assert!(!theme.transitions_enabled());
        theme.on_frame();
        assert!(theme.transitions_enabled());
    }

    #[test]
    fn reset_clears_storage_and_follows_os() {
        let store = MemoryStore::with(DEFAULT_STORAGE_KEY, "light");
        let mut theme = controller(&store, None);

        assert_eq!(theme.reset(Some(true)), Theme::Dark);
        assert!(store.value(DEFAULT_STORAGE_KEY).is_none());
        assert!(theme.stored_theme().is_none());
    }

    #[test]
    fn parse_accepts_only_exact_literals() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!(" dark".parse::<Theme>().is_err());
    }

    #[test]
    fn unknown_theme_error_names_the_value() {
        let err = "Blue".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownTheme("Blue".into()));
        assert_eq!(err.to_string(), "unknown theme \"Blue\"");
        let _: &dyn std::error::Error = &err;
    }
}
