use crate::domain::filter::{FilterDimension, FilterSelection};
use maud::{html, Markup};

/// Choice list for one filter dimension, as the host reported it.
pub struct FilterChoices {
    pub dimension: FilterDimension,
    pub values: Vec<String>,
}

pub fn filter_form(choices: &[FilterChoices], selection: &FilterSelection) -> Markup {
    html! {
        form
            id="filters"
            class="filters"
            hx-post="/filters"
            hx-target="#board"
            hx-swap="outerHTML"
            hx-trigger="change"
        {
            @for group in choices {
                @if !group.values.is_empty() {
                    fieldset {
                        legend { (group.dimension.label()) }
                        @for value in &group.values {
                            label {
                                input
                                    type="checkbox"
                                    name=(group.dimension.as_str())
                                    value=(value)
                                    checked[selection.values(group.dimension).contains(value)];
                                " " (value)
                            }
                        }
                    }
                }
            }
        }
    }
}
