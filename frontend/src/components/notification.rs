use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::language_toggle::LanguageContext;
use crate::controllers::notification::{NotificationSlot, Severity, AUTO_DISMISS_MS, SLIDE_MS};

pub enum SlotAction {
    Show(String, Severity),
    BeginExit(u64),
    Remove(u64),
}

impl Reducible for NotificationSlot {
    type Action = SlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut slot = (*self).clone();
        let changed = match action {
            SlotAction::Show(message, severity) => {
                slot.show(message, severity);
                true
            }
            SlotAction::BeginExit(id) => slot.begin_exit(id),
            SlotAction::Remove(id) => slot.remove(id),
        };
        if changed {
            Rc::new(slot)
        } else {
            self
        }
    }
}

/// Handle for showing notifications, available to every component under
/// [`NotificationHost`].
#[derive(Clone, PartialEq)]
pub struct Notifier(UseReducerDispatcher<NotificationSlot>);

impl Notifier {
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.0.dispatch(SlotAction::Show(message.into(), severity));
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub children: Children,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let slot = use_reducer(NotificationSlot::default);
    let notifier = Notifier(slot.dispatcher());
    let close_label = use_context::<LanguageContext>()
        .map(|ctx| ctx.t("notify.close").to_string())
        .unwrap_or_else(|| "Close".to_string());

    // Auto-dismiss, then slide out. Dropping the pending timer on every
    // change is what cancels it after a manual close or a replacement.
    {
        let dispatcher = slot.dispatcher();
        let phase = slot.current().map(|n| (n.id, n.leaving));
        use_effect_with_deps(
            move |phase| {
                let timer = phase.map(|(id, leaving)| {
                    if leaving {
                        Timeout::new(SLIDE_MS, move || dispatcher.dispatch(SlotAction::Remove(id)))
                    } else {
                        Timeout::new(AUTO_DISMISS_MS, move || {
                            dispatcher.dispatch(SlotAction::BeginExit(id))
                        })
                    }
                });
                move || drop(timer)
            },
            phase,
        );
    }

    let toast = slot.current().map(|n| {
        let palette = n.severity.palette();
        let onclose = {
            let dispatcher = slot.dispatcher();
            let id = n.id;
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(SlotAction::Remove(id)))
        };
        html! {
            <div
                key={n.id.to_string()}
                class={classes!("notification", n.severity.class(), n.leaving.then_some("leaving"))}
                role="status"
                aria-live="polite"
                style={format!("background: {}; border-left: 4px solid {};", palette.background, palette.border)}
            >
                <span class="notification-message">{ &n.message }</span>
                <button type="button" class="notification-close" aria-label={close_label.clone()} onclick={onclose}>
                    {"×"}
                </button>
            </div>
        }
    });

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { for props.children.iter() }
            <style>
            {r#".notification {
    position: fixed;
    top: 90px;
    right: 20px;
    z-index: 1100;
    display: flex;
    align-items: flex-start;
    gap: 1rem;
    max-width: 380px;
    padding: 1rem 1.25rem;
    border-radius: 8px;
    color: #1f2933;
    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.15);
    animation: notification-in 0.3s ease-out forwards;
}
.notification.leaving {
    animation: notification-out 0.3s ease-in forwards;
}
.notification-close {
    background: none;
    border: none;
    font-size: 1.25rem;
    line-height: 1;
    cursor: pointer;
    color: inherit;
}
@keyframes notification-in {
    from { transform: translateX(120%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes notification-out {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(120%); opacity: 0; }
}"#}
            </style>
            { for toast }
        </ContextProvider<Notifier>>
    }
}
