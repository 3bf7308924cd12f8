//! Source selection state machine

/// The three mutually exclusive ways to obtain an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    #[default]
    LocalFile,
    RemoteUrl,
    LiveCapture,
}

/// Which control set the host surface should show.
///
/// Derived from the mode; exactly one field is true after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// File picker (LocalFile only).
    pub file_picker: bool,
    /// URL input and submit button (RemoteUrl only).
    pub url_controls: bool,
    /// Device picker, preview surface, and capture trigger (LiveCapture only).
    pub device_controls: bool,
}

impl Controls {
    pub fn for_mode(mode: AcquisitionMode) -> Self {
        Self {
            file_picker: mode == AcquisitionMode::LocalFile,
            url_controls: mode == AcquisitionMode::RemoteUrl,
            device_controls: mode == AcquisitionMode::LiveCapture,
        }
    }

    /// Count of visible control sets, for the exactly-one invariant.
    pub fn visible_count(&self) -> usize {
        [self.file_picker, self.url_controls, self.device_controls]
            .iter()
            .filter(|&&v| v)
            .count()
    }
}

/// Tracks the active acquisition mode and the selected capture device.
///
/// Stream side effects of a transition belong to the session; this type only
/// answers "what changed" and "what is visible".
pub struct SourceSelector {
    mode: AcquisitionMode,
    device_id: Option<String>,
}

impl SourceSelector {
    pub fn new() -> Self {
        Self {
            mode: AcquisitionMode::default(),
            device_id: None,
        }
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.mode
    }

    pub fn controls(&self) -> Controls {
        Controls::for_mode(self.mode)
    }

    pub fn selected_device(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Switch modes, returning the mode that was active before.
    pub fn set_mode(&mut self, mode: AcquisitionMode) -> AcquisitionMode {
        std::mem::replace(&mut self.mode, mode)
    }

    /// Remember the device choice. `None` or an empty id means the
    /// placeholder entry: no device is selected.
    pub fn select_device(&mut self, device_id: Option<String>) {
        self.device_id = device_id.filter(|id| !id.is_empty());
    }
}

impl Default for SourceSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [AcquisitionMode; 3] = [
        AcquisitionMode::LocalFile,
        AcquisitionMode::RemoteUrl,
        AcquisitionMode::LiveCapture,
    ];

    #[test]
    fn test_initial_mode_is_local_file() {
        let selector = SourceSelector::new();
        assert_eq!(selector.mode(), AcquisitionMode::LocalFile);
        assert!(selector.controls().file_picker);
    }

    #[test]
    fn test_exactly_one_control_set_after_every_transition() {
        for from in ALL_MODES {
            for to in ALL_MODES {
                let mut selector = SourceSelector::new();
                selector.set_mode(from);
                selector.set_mode(to);
                let controls = selector.controls();
                assert_eq!(
                    controls.visible_count(),
                    1,
                    "transition {:?} -> {:?} left {} control sets visible",
                    from,
                    to,
                    controls.visible_count()
                );
            }
        }
    }

    #[test]
    fn test_controls_match_mode() {
        assert!(Controls::for_mode(AcquisitionMode::LocalFile).file_picker);
        assert!(Controls::for_mode(AcquisitionMode::RemoteUrl).url_controls);
        assert!(Controls::for_mode(AcquisitionMode::LiveCapture).device_controls);
    }

    #[test]
    fn test_set_mode_returns_previous() {
        let mut selector = SourceSelector::new();
        let previous = selector.set_mode(AcquisitionMode::LiveCapture);
        assert_eq!(previous, AcquisitionMode::LocalFile);
        assert_eq!(selector.mode(), AcquisitionMode::LiveCapture);
    }

    #[test]
    fn test_empty_device_selection_is_placeholder() {
        let mut selector = SourceSelector::new();
        selector.select_device(Some("cam1".into()));
        assert_eq!(selector.selected_device(), Some("cam1"));

        selector.select_device(Some(String::new()));
        assert_eq!(selector.selected_device(), None);

        selector.select_device(None);
        assert_eq!(selector.selected_device(), None);
    }
}
