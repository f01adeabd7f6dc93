//! Non-interactive widget driver.
//!
//! Mirrors the engine's event stream into a host-side view, prints outbound
//! widget messages as they arrive, and exits after the session reaches a
//! terminal outcome: the first load result, grace expiry, or the add chain
//! finishing.

use anyhow::Result;
use vitrine_core::core::events::WidgetEvent;
use vitrine_core::core::frame::ParentPort;
use vitrine_core::core::widget::WidgetEventRx;
use vitrine_types::{NotificationStatus, Product, WidgetMessage};

use super::MountedWidget;

/// Options for non-interactive execution.
pub struct ExecOptions {
    /// Product name to add after the initial load.
    pub add: Option<String>,
}

pub async fn run_exec(mounted: MountedWidget, options: &ExecOptions) -> Result<()> {
    let MountedWidget {
        mut parent,
        handle,
        mut events,
    } = mounted;
    let mut view = HostView::default();

    // Initial outcome: first load result, or grace expiry without credentials.
    drive_until_settled(&mut parent, &mut events, &mut view).await;

    if let Some(name) = &options.add {
        if !view.authenticated {
            eprintln!("--add ignorado: widget não autenticado");
        } else if name.trim().is_empty() {
            eprintln!("--add ignorado: nome vazio");
        } else {
            handle.add_product(name.clone());
            // Settles on the post-add reload result, or the add failure.
            drive_until_settled(&mut parent, &mut events, &mut view).await;
        }
    }

    // Outbound messages are posted before the events that settled us, so a
    // final non-blocking drain sees all of them.
    while let Some(envelope) = parent.try_recv() {
        print_outbound(&envelope.message);
    }

    print_view(&view);
    Ok(())
}

/// Pumps both channels until the view reaches a terminal outcome.
async fn drive_until_settled(
    parent: &mut ParentPort,
    events: &mut WidgetEventRx,
    view: &mut HostView,
) {
    let mut parent_open = true;
    loop {
        tokio::select! {
            envelope = parent.recv(), if parent_open => match envelope {
                Some(envelope) => print_outbound(&envelope.message),
                None => parent_open = false,
            },
            event = events.recv() => {
                let Some(event) = event else { break };
                if view.apply(event) {
                    break;
                }
            }
        }
    }
}

/// Host-side mirror of the widget state.
#[derive(Default)]
struct HostView {
    authenticated: bool,
    awaiting_auth: bool,
    error: Option<String>,
    products: Vec<Product>,
}

impl HostView {
    /// Applies an engine event; returns true on a terminal outcome.
    fn apply(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::AuthAccepted => {
                self.authenticated = true;
                false
            }
            WidgetEvent::AuthRejected { error } => {
                self.error = Some(error);
                false
            }
            WidgetEvent::GraceExpired => {
                self.awaiting_auth = true;
                true
            }
            WidgetEvent::LoadStarted => {
                self.error = None;
                false
            }
            WidgetEvent::LoadCompleted { products } => {
                self.products = products;
                true
            }
            WidgetEvent::LoadFailed { error } => {
                self.error = Some(error);
                true
            }
            WidgetEvent::AddStarted | WidgetEvent::AddCompleted => false,
            WidgetEvent::AddFailed { error } => {
                self.error = Some(error);
                true
            }
        }
    }
}

fn print_outbound(message: &WidgetMessage) {
    match message {
        WidgetMessage::AppLoaded => println!("APP_LOADED"),
        WidgetMessage::ShowNotification(notification) => {
            let status = match notification.status {
                NotificationStatus::Success => "success",
                NotificationStatus::Error => "error",
            };
            println!("SHOW_NOTIFICATION [{status}] {}", notification.text);
        }
    }
}

fn print_view(view: &HostView) {
    if let Some(error) = &view.error {
        println!("{error}");
    }
    if !view.authenticated {
        if view.awaiting_auth {
            println!("Aguardando Autenticação");
        }
        return;
    }
    if view.products.is_empty() {
        println!("Nenhum produto encontrado");
        return;
    }
    println!("Produtos:");
    for product in &view.products {
        println!("- {} ({})", product.name, product.created_date());
    }
}
