use maud::{html, Markup};

/// The page-wide alert box. Empty and hidden when there is nothing to say.
pub fn alert_box(messages: &[String], oob: bool) -> Markup {
    html! {
        div id="master-error-alert"
            class="alert alert-danger"
            hidden[messages.is_empty()]
            hx-swap-oob=[oob.then_some("true")]
        {
            @for message in messages {
                p { (message) }
            }
        }
    }
}
