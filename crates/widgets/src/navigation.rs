//! Navigation
//! 
//! Follows links clicked on calendar events and opens the editor's popup
//! dialogs. The page decides whether a link replaces the current view or
//! opens in a modal overlay; the popup window handle is owned here so that
//! opening a dialog closes the previous one.

use std::sync::Arc;
use tracing::{debug, info};

use wikipad_core::config::{ModalConfig, PopupConfig, PopupTarget};
use wikipad_core::{DisplayMode, Event, EventBus};

/// Element that received a click inside an event box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A link; its own href wins
    Anchor { href: String },
    /// An image, usually wrapped in a link
    Image { parent_href: Option<String> },
    /// Anything else in the box
    Other,
}

/// Pick the URL a click should follow. `fallback` is the box's own link.
pub fn resolve_event_link(target: &ClickTarget, fallback: Option<&str>) -> Option<String> {
    match target {
        ClickTarget::Anchor { href } => Some(href.clone()),
        ClickTarget::Image { parent_href: Some(href) } => Some(href.clone()),
        ClickTarget::Image { parent_href: None } | ClickTarget::Other => fallback.map(str::to_string),
    }
}

/// Append a `key=value` query parameter, keeping any `#fragment` last
pub fn add_parameter_to_url(url: &str, param: &str) -> String {
    let (base, fragment) = match url.find('#') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}{}", base, separator, param, fragment)
}

/// Window features string for a popup of the given size
pub fn window_features(width: u32, height: u32) -> String {
    format!(
        "menubar=no, status=no, scrollbars=yes, resizable=yes, width={}, height={}",
        width, height
    )
}

/// A modal overlay to open
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub overlay_color: String,
    pub overlay_opacity: f32,
    pub reload_on_close: bool,
    pub hide_on_overlay_click: bool,
}

/// A browser window opened by `Navigator::open_window`
pub trait WindowHandle {
    fn is_closed(&self) -> bool;
    fn close(&mut self);
}

/// The page's navigation capabilities
pub trait Navigator {
    /// Replace the current view
    fn navigate(&mut self, url: &str);

    fn open_modal(&mut self, request: ModalRequest);

    fn open_window(&mut self, url: &str, name: &str, features: &str) -> Box<dyn WindowHandle>;
}

/// Popup dialogs of the editor toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    AddLink,
    AddImage,
    Help,
}

/// Owner of the single popup window
pub struct PopupWindow {
    name: String,
    current: Option<Box<dyn WindowHandle>>,
}

impl PopupWindow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.as_ref().is_some_and(|window| !window.is_closed())
    }

    /// Close the previous popup if it is still open; returns whether it was
    pub fn close(&mut self) -> bool {
        match self.current.take() {
            Some(mut window) if !window.is_closed() => {
                window.close();
                true
            }
            _ => false,
        }
    }

    /// Close the previous popup, then open `url`
    pub fn open(&mut self, navigator: &mut dyn Navigator, url: &str, width: u32, height: u32) -> bool {
        let closed = self.close();
        let features = window_features(width, height);
        debug!("Opening popup {} ({})", url, features);
        self.current = Some(navigator.open_window(url, &self.name, &features));
        closed
    }
}

/// Dispatches clicks and toolbar popups
pub struct NavigationTrigger {
    mode: DisplayMode,
    modal: ModalConfig,
    popups: PopupConfig,
    window: PopupWindow,
    events: Option<Arc<EventBus>>,
}

impl NavigationTrigger {
    pub fn new(mode: DisplayMode, modal: ModalConfig, popups: PopupConfig) -> Self {
        let window = PopupWindow::new(popups.window_name.clone());
        Self {
            mode,
            modal,
            popups,
            window,
            events: None,
        }
    }

    pub fn from_config(config: &wikipad_core::AppConfig) -> Self {
        Self::new(
            config.navigation.display_mode,
            config.modal.clone(),
            config.popup.clone(),
        )
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn popup_window(&self) -> &PopupWindow {
        &self.window
    }

    /// Follow a resolved URL according to the display mode
    pub fn follow(&mut self, navigator: &mut dyn Navigator, url: &str) {
        match self.mode {
            DisplayMode::Direct => navigator.navigate(url),
            DisplayMode::Modal => navigator.open_modal(self.modal_request(url)),
        }
        info!("Followed {} ({:?})", url, self.mode);
        self.emit(Event::Navigated {
            url: url.to_string(),
            mode: self.mode,
        });
    }

    /// Handle a click in an event box; returns whether a link was followed
    pub fn click(
        &mut self,
        navigator: &mut dyn Navigator,
        target: &ClickTarget,
        fallback: Option<&str>,
    ) -> bool {
        match resolve_event_link(target, fallback) {
            Some(url) => {
                self.follow(navigator, &url);
                true
            }
            None => false,
        }
    }

    /// Open one of the toolbar's popup dialogs
    pub fn open_popup(&mut self, navigator: &mut dyn Navigator, kind: PopupKind) {
        let PopupTarget { url, width, height } = match kind {
            PopupKind::AddLink => self.popups.link.clone(),
            PopupKind::AddImage => self.popups.image.clone(),
            PopupKind::Help => self.popups.help.clone(),
        };
        if self.window.open(navigator, &url, width, height) {
            self.emit(Event::PopupClosed);
        }
        self.emit(Event::PopupOpened { url });
    }

    fn modal_request(&self, url: &str) -> ModalRequest {
        ModalRequest {
            url: add_parameter_to_url(url, &self.modal.marker_param),
            width: self.modal.width,
            height: self.modal.height,
            overlay_color: self.modal.overlay_color.clone(),
            overlay_opacity: self.modal.overlay_opacity,
            reload_on_close: self.modal.reload_on_close,
            hide_on_overlay_click: self.modal.hide_on_overlay_click,
        }
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wikipad_core::AppConfig;

    struct FakeWindow {
        closed: Rc<Cell<bool>>,
    }

    impl WindowHandle for FakeWindow {
        fn is_closed(&self) -> bool {
            self.closed.get()
        }

        fn close(&mut self) {
            self.closed.set(true);
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        visited: Vec<String>,
        modals: Vec<ModalRequest>,
        windows: Vec<(String, String, String)>,
        handles: RefCell<Vec<Rc<Cell<bool>>>>,
    }

    impl Navigator for FakeNavigator {
        fn navigate(&mut self, url: &str) {
            self.visited.push(url.to_string());
        }

        fn open_modal(&mut self, request: ModalRequest) {
            self.modals.push(request);
        }

        fn open_window(&mut self, url: &str, name: &str, features: &str) -> Box<dyn WindowHandle> {
            self.windows.push((url.into(), name.into(), features.into()));
            let closed = Rc::new(Cell::new(false));
            self.handles.borrow_mut().push(closed.clone());
            Box::new(FakeWindow { closed })
        }
    }

    #[test]
    fn test_resolve_event_link() {
        let anchor = ClickTarget::Anchor { href: "/event/1".into() };
        assert_eq!(resolve_event_link(&anchor, Some("/box")), Some("/event/1".into()));

        let image = ClickTarget::Image { parent_href: Some("/event/2".into()) };
        assert_eq!(resolve_event_link(&image, Some("/box")), Some("/event/2".into()));

        assert_eq!(resolve_event_link(&ClickTarget::Other, Some("/box")), Some("/box".into()));
        assert_eq!(resolve_event_link(&ClickTarget::Other, None), None);
    }

    #[test]
    fn test_add_parameter_to_url() {
        assert_eq!(add_parameter_to_url("/cal/;edit", "fancybox=1"), "/cal/;edit?fancybox=1");
        assert_eq!(
            add_parameter_to_url("/cal/;edit?id=3", "fancybox=1"),
            "/cal/;edit?id=3&fancybox=1"
        );
        assert_eq!(
            add_parameter_to_url("/cal/;edit?id=3#top", "fancybox=1"),
            "/cal/;edit?id=3&fancybox=1#top"
        );
    }

    #[test]
    fn test_direct_mode_navigates() {
        let mut nav = FakeNavigator::default();
        let mut trigger = NavigationTrigger::from_config(&AppConfig::default());

        assert!(trigger.click(&mut nav, &ClickTarget::Other, Some("/event/7")));
        assert_eq!(nav.visited, vec!["/event/7".to_string()]);
        assert!(nav.modals.is_empty());
    }

    #[test]
    fn test_modal_mode_opens_overlay() {
        let mut config = AppConfig::default();
        config.navigation.display_mode = DisplayMode::Modal;
        let bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let mut nav = FakeNavigator::default();
        let mut trigger = NavigationTrigger::from_config(&config).with_events(bus);

        trigger.follow(&mut nav, "/event/7");
        assert!(nav.visited.is_empty());
        assert_eq!(nav.modals.len(), 1);
        assert_eq!(nav.modals[0].url, "/event/7?fancybox=1");
        assert_eq!((nav.modals[0].width, nav.modals[0].height), (800, 550));
        assert_eq!(
            sub.try_recv().unwrap(),
            Event::Navigated { url: "/event/7".into(), mode: DisplayMode::Modal }
        );
    }

    #[test]
    fn test_popup_closes_previous() {
        let mut nav = FakeNavigator::default();
        let mut trigger = NavigationTrigger::from_config(&AppConfig::default());

        trigger.open_popup(&mut nav, PopupKind::AddLink);
        assert!(trigger.popup_window().is_open());
        trigger.open_popup(&mut nav, PopupKind::Help);

        let handles = nav.handles.borrow();
        assert!(handles[0].get());
        assert!(!handles[1].get());
        assert_eq!(nav.windows[0].0, "../;add_link?mode=wiki");
        assert_eq!(nav.windows[1].1, "itools_popup");
        assert_eq!(
            nav.windows[1].2,
            "menubar=no, status=no, scrollbars=yes, resizable=yes, width=600, height=400"
        );
    }

    #[test]
    fn test_closed_popup_is_not_closed_again() {
        let mut nav = FakeNavigator::default();
        let mut window = PopupWindow::new("itools_popup");
        assert!(!window.open(&mut nav, "/a", 10, 10));
        nav.handles.borrow()[0].set(true);
        assert!(!window.is_open());
        assert!(!window.open(&mut nav, "/b", 10, 10));
    }
}
