//! Icon picker dialog.
//!
//! The dialog resolves a stylesheet URL, fetches it, detects the icon library
//! and extracts the selectable classes. From then on search and style
//! filters only narrow the extracted list.
//!
//! ```text
//! NoUrlConfigured ──set_url──▶ Fetching ──▶ Ready
//!                                 │     ├──▶ FetchFailed
//!                                 │     └──▶ EmptyResult
//!                                 └── stale tickets are discarded
//! ```
//!
//! Every fetch is tagged with a [`FetchTicket`]. A result whose ticket is not
//! the latest one issued for the current URL is dropped, so a slow response
//! for an old URL can never overwrite a newer one.

use crate::config::{DialogInvocation, InstallationParameters};
use crate::core::{extract_icons, search, DetectionFallback, IconFilter, LibraryRegistry};
use crate::error::{PickerError, PickerResult};
use crate::services::{CssFetcher, IconManifest, StylesheetSet, ICON_FONT_LINK_ID};

/// Message shown when the stylesheet parsed but yielded no icons.
pub const EMPTY_RESULT_MESSAGE: &str = "No icon classes found in the CSS file. Check the URL.";

/// Message shown when no stylesheet URL is configured.
pub const NO_URL_MESSAGE: &str =
    "No icon font CSS URL configured. Set one on the app configuration screen.";

/// Identity of one fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    url: String,
}

impl FetchTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Where the dialog is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    NoUrlConfigured,
    Fetching {
        url: String,
    },
    Ready {
        url: String,
        library: String,
        icons: Vec<String>,
    },
    FetchFailed {
        url: String,
        message: String,
    },
    EmptyResult {
        url: String,
        /// `None` when no library matched under the strict policy
        library: Option<String>,
    },
}

impl PickerState {
    /// User-facing status text.
    pub fn status_message(&self) -> String {
        match self {
            PickerState::NoUrlConfigured => NO_URL_MESSAGE.to_string(),
            PickerState::Fetching { .. } => "Loading icons...".to_string(),
            PickerState::Ready { library, icons, .. } => {
                format!("{} icons from {}", icons.len(), library)
            }
            PickerState::FetchFailed { message, .. } => message.clone(),
            PickerState::EmptyResult { .. } => EMPTY_RESULT_MESSAGE.to_string(),
        }
    }

    /// The error this state represents, if any.
    pub fn error(&self) -> Option<PickerError> {
        match self {
            PickerState::NoUrlConfigured => Some(PickerError::ConfigurationMissing),
            PickerState::FetchFailed { message, .. } => {
                Some(PickerError::FetchFailed(message.clone()))
            }
            PickerState::EmptyResult { url, .. } => {
                Some(PickerError::EmptyExtraction { url: url.clone() })
            }
            PickerState::Fetching { .. } | PickerState::Ready { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PickerState::Ready { .. })
    }
}

/// Value the dialog closes with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Selected(String),
    Cancelled,
}

/// One picker dialog session.
#[derive(Debug)]
pub struct PickerDialog<'r> {
    registry: &'r LibraryRegistry,
    fallback: DetectionFallback,
    manifest: Option<IconManifest>,
    selected: Option<String>,
    url: Option<String>,
    next_request: u64,
    in_flight: Option<FetchTicket>,
    state: PickerState,
    filter: IconFilter,
    closed: bool,
}

impl<'r> PickerDialog<'r> {
    /// Open a dialog and start fetching if a URL is available.
    pub fn open(
        registry: &'r LibraryRegistry,
        install: &InstallationParameters,
        invocation: DialogInvocation,
    ) -> (Self, Option<FetchTicket>) {
        let url = invocation.resolve_css_url(install);
        let mut dialog = Self {
            registry,
            fallback: DetectionFallback::default(),
            manifest: None,
            selected: invocation.selected,
            url,
            next_request: 0,
            in_flight: None,
            state: PickerState::NoUrlConfigured,
            filter: IconFilter::default(),
            closed: false,
        };

        let ticket = dialog.begin_fetch();
        (dialog, ticket)
    }

    pub fn with_fallback(mut self, fallback: DetectionFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Use an offline manifest for libraries that have one.
    pub fn with_manifest(mut self, manifest: IconManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn status_message(&self) -> String {
        self.state.status_message()
    }

    /// Whether `icon` is the value the dialog was opened with.
    pub fn is_selected(&self, icon: &str) -> bool {
        self.selected.as_deref() == Some(icon)
    }

    /// Issue a new fetch for the current URL.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.closed {
            return None;
        }

        let Some(url) = self.url.clone() else {
            self.in_flight = None;
            self.state = PickerState::NoUrlConfigured;
            return None;
        };

        self.next_request += 1;
        let ticket = FetchTicket {
            id: self.next_request,
            url: url.clone(),
        };
        self.in_flight = Some(ticket.clone());
        self.filter = IconFilter::default();
        self.state = PickerState::Fetching { url };
        Some(ticket)
    }

    /// Point the dialog at a different stylesheet and refetch.
    pub fn set_url(&mut self, url: &str) -> Option<FetchTicket> {
        let url = url.trim();
        self.url = (!url.is_empty()).then(|| url.to_string());
        self.begin_fetch()
    }

    /// Apply the outcome of a fetch.
    ///
    /// Results for tickets that are no longer current are discarded and
    /// reported as [`PickerError::StaleResult`]; the state is left untouched.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: PickerResult<String>,
    ) -> PickerResult<&PickerState> {
        if self.closed {
            return Err(PickerError::DialogClosed);
        }

        let current = self.in_flight.as_ref();
        let is_current = current.is_some_and(|t| t.id == ticket.id)
            && self.url.as_deref() == Some(ticket.url.as_str());
        if !is_current {
            let current = self.url.clone().unwrap_or_default();
            tracing::debug!(requested = %ticket.url, current = %current, "Discarding stale fetch result");
            return Err(PickerError::StaleResult {
                requested: ticket.url,
                current,
            });
        }

        self.in_flight = None;
        let url = ticket.url;
        self.state = match result {
            Err(e) => {
                tracing::warn!(url = %url, "Stylesheet fetch failed: {}", e);
                PickerState::FetchFailed {
                    url,
                    message: e.to_string(),
                }
            }
            Ok(css) => self.process(url, &css),
        };

        Ok(&self.state)
    }

    fn process(&self, url: String, css: &str) -> PickerState {
        let library = match self.registry.detect_or_fallback(&url, Some(css), self.fallback) {
            Ok(lib) => lib,
            Err(e) => {
                tracing::warn!(url = %url, "{}", e);
                return PickerState::EmptyResult { url, library: None };
            }
        };

        let icons = match &self.manifest {
            Some(manifest) if library.metadata_available => match manifest.icon_classes(library) {
                Ok(icons) => icons,
                Err(e) => {
                    tracing::warn!("Ignoring icon manifest: {}", e);
                    extract_icons(css, library)
                }
            },
            _ => extract_icons(css, library),
        };

        if icons.is_empty() {
            return PickerState::EmptyResult {
                url,
                library: Some(library.name.clone()),
            };
        }

        tracing::info!(library = %library.name, count = icons.len(), "Icons ready");
        PickerState::Ready {
            url,
            library: library.name.clone(),
            icons,
        }
    }

    /// Fetch and process the current URL with `fetcher`.
    pub async fn run<F: CssFetcher>(&mut self, fetcher: &F) -> PickerResult<&PickerState> {
        let ticket = match self.in_flight.clone() {
            Some(ticket) => ticket,
            None => self.begin_fetch().ok_or(PickerError::ConfigurationMissing)?,
        };
        let result = fetcher.fetch(ticket.url()).await;
        self.complete_fetch(ticket, result)
    }

    /// Set the free-text search. Ignored unless icons are loaded.
    pub fn set_search(&mut self, term: &str) -> bool {
        if !self.state.is_ready() {
            return false;
        }
        self.filter.search = term.to_string();
        true
    }

    /// Restrict to one style group, or clear with `None`. Ignored unless
    /// icons are loaded.
    pub fn set_style_filter(&mut self, style: Option<&str>) -> bool {
        if !self.state.is_ready() {
            return false;
        }
        self.filter.style = style.map(str::to_string);
        true
    }

    pub fn filter(&self) -> &IconFilter {
        &self.filter
    }

    /// Icons passing the current filters, in sorted order.
    pub fn visible_icons(&self) -> Vec<&str> {
        let PickerState::Ready { library, icons, .. } = &self.state else {
            return Vec::new();
        };
        match self.registry.get(library) {
            Some(lib) => self.filter.apply(icons, lib, self.registry),
            None => Vec::new(),
        }
    }

    /// Style groups with icon counts, for the filter tabs.
    pub fn style_groups(&self) -> Vec<(&str, usize)> {
        let PickerState::Ready { library, icons, .. } = &self.state else {
            return Vec::new();
        };
        self.registry
            .get(library)
            .map(|lib| search::style_counts(icons, lib))
            .unwrap_or_default()
    }

    /// Whether `icon` is one of the extracted classes.
    pub fn contains(&self, icon: &str) -> bool {
        match &self.state {
            PickerState::Ready { icons, .. } => icons
                .binary_search_by(|probe| probe.as_str().cmp(icon))
                .is_ok(),
            _ => false,
        }
    }

    /// Point the shared icon font link at this dialog's stylesheet.
    pub fn attach_stylesheet(&self, links: &mut StylesheetSet) -> bool {
        match &self.url {
            Some(url) => links.ensure(ICON_FONT_LINK_ID, url),
            None => false,
        }
    }

    /// Pick an icon and close the dialog.
    pub fn select(&mut self, icon: &str) -> PickerResult<DialogResult> {
        if self.closed {
            return Err(PickerError::DialogClosed);
        }
        self.closed = true;
        self.in_flight = None;
        tracing::info!(icon, "Icon selected");
        Ok(DialogResult::Selected(icon.to_string()))
    }

    /// Close without picking anything.
    pub fn cancel(&mut self) -> PickerResult<DialogResult> {
        if self.closed {
            return Err(PickerError::DialogClosed);
        }
        self.closed = true;
        self.in_flight = None;
        Ok(DialogResult::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FA_URL: &str = "https://use.fontawesome.com/releases/v6.4.0/css/all.css";
    const PH_URL: &str = "https://cdn.jsdelivr.net/npm/@phosphor-icons/web@2.1.2/src/regular/style.css";
    const FA_CSS: &str = ".fa-star:before{content:\"\\f005\"}.fa-heart:before{content:\"\\f004\"}";
    const PH_CSS: &str = ".ph.ph-heart:before{content:\"\\e2a8\"}";

    fn open(url: Option<&str>) -> (PickerDialog<'static>, Option<FetchTicket>) {
        let install = InstallationParameters {
            icon_font_css_url: url.map(str::to_string),
        };
        PickerDialog::open(LibraryRegistry::builtin(), &install, DialogInvocation::default())
    }

    #[test]
    fn test_no_url() {
        let (mut dialog, ticket) = open(None);
        assert!(ticket.is_none());
        assert_eq!(dialog.state(), &PickerState::NoUrlConfigured);
        assert_eq!(dialog.status_message(), NO_URL_MESSAGE);
        assert!(dialog.begin_fetch().is_none());
        assert!(matches!(
            dialog.state().error(),
            Some(PickerError::ConfigurationMissing)
        ));
    }

    #[test]
    fn test_open_starts_fetching() {
        let (dialog, ticket) = open(Some(FA_URL));
        assert_eq!(ticket.unwrap().url(), FA_URL);
        assert_eq!(dialog.state(), &PickerState::Fetching { url: FA_URL.into() });
    }

    #[test]
    fn test_ready() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        dialog.complete_fetch(ticket.unwrap(), Ok(FA_CSS.into())).unwrap();

        let PickerState::Ready { library, icons, .. } = dialog.state() else {
            panic!("expected ready, got {:?}", dialog.state());
        };
        assert_eq!(library, "Font Awesome");
        assert_eq!(icons.len(), 6);
        assert_eq!(dialog.status_message(), "6 icons from Font Awesome");
        assert!(dialog.contains("fa-regular fa-heart"));
        assert!(!dialog.contains("fa-regular fa-bolt"));
    }

    #[test]
    fn test_fetch_failed_keeps_message() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        let err = PickerError::FetchFailed("Failed to fetch CSS: HTTP 404 Not Found".into());
        dialog.complete_fetch(ticket.unwrap(), Err(err)).unwrap();

        assert_eq!(
            dialog.status_message(),
            "Failed to fetch CSS: HTTP 404 Not Found"
        );
        assert!(matches!(
            dialog.state().error(),
            Some(PickerError::FetchFailed(_))
        ));
    }

    #[test]
    fn test_empty_result_is_distinct() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        let css = "@font-face{font-family:\"Font Awesome 6 Free\"}";
        dialog.complete_fetch(ticket.unwrap(), Ok(css.into())).unwrap();

        assert_eq!(
            dialog.state(),
            &PickerState::EmptyResult {
                url: FA_URL.into(),
                library: Some("Font Awesome".into())
            }
        );
        assert_eq!(dialog.status_message(), EMPTY_RESULT_MESSAGE);
        assert!(matches!(
            dialog.state().error(),
            Some(PickerError::EmptyExtraction { .. })
        ));
    }

    #[test]
    fn test_strict_fallback_reports_empty() {
        let install = InstallationParameters::with_url("https://example.com/custom.css");
        let (dialog, ticket) =
            PickerDialog::open(LibraryRegistry::builtin(), &install, DialogInvocation::default());
        let mut dialog = dialog.with_fallback(DetectionFallback::Strict);
        dialog.complete_fetch(ticket.unwrap(), Ok("body{}".into())).unwrap();
        assert!(matches!(
            dialog.state(),
            PickerState::EmptyResult { library: None, .. }
        ));
    }

    #[test]
    fn test_stale_result_after_url_change() {
        let (mut dialog, old_ticket) = open(Some(FA_URL));
        let new_ticket = dialog.set_url(PH_URL).unwrap();

        let err = dialog
            .complete_fetch(old_ticket.unwrap(), Ok(FA_CSS.into()))
            .unwrap_err();
        assert!(matches!(err, PickerError::StaleResult { ref requested, .. } if requested == FA_URL));
        assert_eq!(dialog.state(), &PickerState::Fetching { url: PH_URL.into() });

        dialog.complete_fetch(new_ticket, Ok(PH_CSS.into())).unwrap();
        let PickerState::Ready { library, .. } = dialog.state() else {
            panic!("expected ready");
        };
        assert_eq!(library, "Phosphor");
    }

    #[test]
    fn test_stale_result_after_refetch_of_same_url() {
        let (mut dialog, first) = open(Some(FA_URL));
        let second = dialog.begin_fetch().unwrap();

        assert!(dialog.complete_fetch(first.unwrap(), Ok(FA_CSS.into())).is_err());
        assert!(dialog.complete_fetch(second.clone(), Ok(FA_CSS.into())).is_ok());
        // A ticket can only be applied once
        assert!(dialog.complete_fetch(second, Ok(FA_CSS.into())).is_err());
    }

    #[test]
    fn test_filters_inert_until_ready() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        assert!(!dialog.set_search("star"));
        assert!(!dialog.set_style_filter(Some("solid")));
        assert!(dialog.visible_icons().is_empty());

        dialog.complete_fetch(ticket.unwrap(), Ok(FA_CSS.into())).unwrap();
        assert_eq!(dialog.visible_icons().len(), 6);

        assert!(dialog.set_search("st"));
        assert_eq!(
            dialog.visible_icons(),
            ["fa-brands fa-star", "fa-regular fa-star", "fa-solid fa-star"]
        );

        assert!(dialog.set_style_filter(Some("solid")));
        assert_eq!(dialog.visible_icons(), ["fa-solid fa-star"]);

        dialog.set_style_filter(None);
        dialog.set_search("");
        assert_eq!(dialog.visible_icons().len(), 6);
    }

    #[test]
    fn test_style_groups() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        assert!(dialog.style_groups().is_empty());
        dialog.complete_fetch(ticket.unwrap(), Ok(FA_CSS.into())).unwrap();
        assert_eq!(
            dialog.style_groups(),
            [("solid", 2), ("regular", 2), ("brands", 2)]
        );
    }

    #[test]
    fn test_manifest_fast_path() {
        let manifest = IconManifest::from_json(r#"{"star":{"styles":["solid"]}}"#).unwrap();
        let (dialog, ticket) = open(Some(FA_URL));
        let mut dialog = dialog.with_manifest(manifest);
        dialog.complete_fetch(ticket.unwrap(), Ok(FA_CSS.into())).unwrap();
        assert_eq!(dialog.visible_icons(), ["fa-solid fa-star"]);
    }

    #[test]
    fn test_select_is_terminal() {
        let (mut dialog, ticket) = open(Some(FA_URL));
        let ticket = ticket.unwrap();
        let result = dialog.select("fa-solid fa-star").unwrap();
        assert_eq!(result, DialogResult::Selected("fa-solid fa-star".into()));
        assert!(dialog.is_closed());

        assert!(matches!(dialog.cancel(), Err(PickerError::DialogClosed)));
        assert!(matches!(
            dialog.complete_fetch(ticket, Ok(FA_CSS.into())),
            Err(PickerError::DialogClosed)
        ));
    }

    #[test]
    fn test_cancel() {
        let (mut dialog, _) = open(Some(FA_URL));
        assert_eq!(dialog.cancel().unwrap(), DialogResult::Cancelled);
        assert!(dialog.begin_fetch().is_none());
    }

    #[test]
    fn test_invocation_selected() {
        let invocation = DialogInvocation {
            selected: Some("fa-solid fa-star".into()),
            icon_font_css_url: Some(FA_URL.into()),
        };
        let (dialog, ticket) = PickerDialog::open(
            LibraryRegistry::builtin(),
            &InstallationParameters::default(),
            invocation,
        );
        assert!(ticket.is_some());
        assert!(dialog.is_selected("fa-solid fa-star"));
        assert!(!dialog.is_selected("fa-solid fa-heart"));
    }

    #[test]
    fn test_attach_stylesheet() {
        let mut links = StylesheetSet::new();
        let (dialog, _) = open(Some(FA_URL));
        assert!(dialog.attach_stylesheet(&mut links));
        assert!(!dialog.attach_stylesheet(&mut links));
        assert_eq!(links.get(ICON_FONT_LINK_ID).unwrap().href, FA_URL);

        let (none, _) = open(None);
        assert!(!none.attach_stylesheet(&mut links));
    }
}
