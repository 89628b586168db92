//! Dialog trait system for unified dialog management
//!
//! Each dialog implements the `Dialog` trait, encapsulating its state, actions, and rendering.

use egui::{Context, Ui};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Keep the dialog open but perform the specified action
    Action(A),
}

impl<A> DialogAction<A> {
    /// Check if the action indicates the dialog should close
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close)
    }

    /// Extract the action if present
    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Trait for dialog state management
pub trait DialogState: Default {
    /// Reset the dialog state to its default values
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Configuration for dialog appearance
///
/// Dialogs are shown as modals: they dim the background and close on
/// Escape or an outside click.
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    /// Width of the dialog content
    pub width: f32,
}

impl DialogWindowConfig {
    /// Create a centered modal dialog configuration
    pub fn centered_modal(width: f32) -> Self {
        Self { width }
    }
}

/// Main dialog trait for implementing dialogs
///
/// The trait uses associated types for type-safe state, actions, and context.
pub trait Dialog {
    /// The state type for this dialog
    type State: DialogState;

    /// The action type this dialog can produce
    type Action;

    /// The context type needed to render this dialog
    type Context<'a>;

    /// Get the window title for this dialog
    fn title(state: &Self::State, ctx: &Self::Context<'_>) -> String;

    /// Get the window configuration for this dialog
    fn window_config() -> DialogWindowConfig;

    /// Render the dialog content
    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Show a dialog using the Dialog trait
///
/// This helper function handles the common dialog lifecycle:
/// - Only renders if `is_open` is true
/// - Creates a modal with the dialog's configuration
/// - Calls the dialog's render method
/// - Handles closing and state reset
///
/// Returns `Some(action)` if the dialog produced an action, `None` otherwise.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();
    let title = D::title(state, &dialog_ctx);

    let response = egui::Modal::new(egui::Id::new(("dialog", title.as_str()))).show(ctx, |ui| {
        ui.set_width(config.width);
        ui.heading(&title);
        ui.separator();
        D::render(state, dialog_ctx, ui)
    });
    // Escape or a click outside the modal closes it
    let action = if response.should_close() && !response.inner.should_close() {
        DialogAction::Close
    } else {
        response.inner
    };

    let should_close = action.should_close();
    let action_result = action.into_action();

    if should_close {
        *is_open = false;
        state.reset();
    }

    action_result
}

pub mod node_details;

pub use node_details::{NodeDetailsAction, NodeDetailsDialog, NodeDetailsState};
