//! Field renderer for an icon-valued field.
//!
//! Shows the current selection, opens the picker dialog with it, and writes
//! back whatever the dialog returns.

use crate::config::{DialogInvocation, InstallationParameters};
use crate::core::LibraryRegistry;
use crate::error::PickerResult;
use crate::picker::DialogResult;
use crate::services::FieldValueStore;

pub struct FieldRenderer<S: FieldValueStore> {
    store: S,
    selected: Option<String>,
}

impl<S: FieldValueStore> FieldRenderer<S> {
    pub fn new(store: S) -> Self {
        let selected = store.get_value().filter(|v| !v.trim().is_empty());
        Self { store, selected }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Short label for the current selection, e.g. `star`.
    pub fn display_label(&self, registry: &LibraryRegistry) -> Option<String> {
        self.selected
            .as_deref()
            .map(|icon| registry.clean_display_name(icon))
    }

    /// Mirror a value change made outside the picker.
    pub fn on_value_changed(&mut self, value: Option<String>) {
        self.selected = value.filter(|v| !v.trim().is_empty());
    }

    /// Parameters for opening the picker dialog.
    pub fn dialog_invocation(&self, install: &InstallationParameters) -> DialogInvocation {
        DialogInvocation {
            selected: self.selected.clone(),
            icon_font_css_url: install.css_url().map(str::to_string),
        }
    }

    /// Persist the dialog's pick. Cancelling leaves the value alone.
    ///
    /// Returns true if the stored value was written.
    pub fn apply_dialog_result(&mut self, result: DialogResult) -> PickerResult<bool> {
        match result {
            DialogResult::Selected(icon) => {
                self.store.set_value(&icon)?;
                self.selected = Some(icon);
                Ok(true)
            }
            DialogResult::Cancelled => Ok(false),
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryFieldStore;

    #[test]
    fn test_reads_initial_value() {
        let field = FieldRenderer::new(MemoryFieldStore::new(Some("fa-solid fa-star".into())));
        assert_eq!(field.selected(), Some("fa-solid fa-star"));
        assert_eq!(
            field.display_label(LibraryRegistry::builtin()).as_deref(),
            Some("star")
        );
    }

    #[test]
    fn test_blank_value_is_none() {
        let field = FieldRenderer::new(MemoryFieldStore::new(Some("  ".into())));
        assert_eq!(field.selected(), None);
    }

    #[test]
    fn test_apply_selected() {
        let mut field = FieldRenderer::new(MemoryFieldStore::default());
        let written = field
            .apply_dialog_result(DialogResult::Selected("ph ph-heart".into()))
            .unwrap();
        assert!(written);
        assert_eq!(field.selected(), Some("ph ph-heart"));
        assert_eq!(field.into_store().get_value().as_deref(), Some("ph ph-heart"));
    }

    #[test]
    fn test_cancel_keeps_value() {
        let mut field = FieldRenderer::new(MemoryFieldStore::new(Some("bi bi-alarm".into())));
        assert!(!field.apply_dialog_result(DialogResult::Cancelled).unwrap());
        assert_eq!(field.selected(), Some("bi bi-alarm"));
    }

    #[test]
    fn test_external_change() {
        let mut field = FieldRenderer::new(MemoryFieldStore::default());
        field.on_value_changed(Some("mdi mdi-account".into()));
        assert_eq!(field.selected(), Some("mdi mdi-account"));
        field.on_value_changed(None);
        assert_eq!(field.selected(), None);
    }

    #[test]
    fn test_dialog_invocation() {
        let field = FieldRenderer::new(MemoryFieldStore::new(Some("fa-solid fa-star".into())));
        let install = InstallationParameters::with_url("https://x/all.css");
        let invocation = field.dialog_invocation(&install);
        assert_eq!(invocation.selected.as_deref(), Some("fa-solid fa-star"));
        assert_eq!(invocation.icon_font_css_url.as_deref(), Some("https://x/all.css"));
    }
}
