use yew::events::MouseEvent;
use yew::prelude::*;

use crate::consts::CONTROL_TEXT_CLASS;

/// An interactive button for yew rendered player controls.
///
/// The button stays focusable while disabled and announces its state through `aria-disabled`.
/// Clicks on a disabled button are dropped.
pub struct Button;

impl Component for Button {
    type Message = ();
    type Properties = Properties;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn update(&mut self, ctx: &Context<Self>, _msg: Self::Message) -> bool {
        let props = ctx.props();
        forward_click(props.disabled, props.onclick.as_ref());

        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        let title = props.title.clone();
        let label = props.title.clone();
        let classes = props.classes.clone();
        let aria_disabled = if props.disabled { "true" } else { "false" };

        let onclick = ctx.link().callback(|_: MouseEvent| ());

        html! {
            <button type="button" class={classes} {title} aria-disabled={aria_disabled} {onclick}>
                <span class={CONTROL_TEXT_CLASS} aria-live="polite">{ label }</span>
                { for props.children.iter() }
            </button>
        }
    }
}

/// Emits `onclick` unless the button is disabled. Returns `true` if the click was forwarded.
fn forward_click(disabled: bool, onclick: Option<&Callback<()>>) -> bool {
    if disabled {
        log::trace!("Ignoring click on disabled button");
        return false;
    }

    match onclick {
        Some(cb) => {
            cb.emit(());
            true
        }
        None => false,
    }
}

#[derive(Clone, Debug, PartialEq, Properties)]
pub struct Properties {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub onclick: Option<Callback<()>>,
    #[prop_or_default]
    pub disabled: bool,
    /// Accessible label of the button.
    pub title: String,
    #[prop_or_default]
    pub classes: Classes,
}
