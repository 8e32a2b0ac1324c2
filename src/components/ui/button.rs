use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonVariant {
    fn get_classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "bg-red-600 text-white hover:bg-red-700 active:bg-red-800 \
                 focus:ring-2 focus:ring-red-400 border border-red-600"
            }
            ButtonVariant::Secondary => {
                "bg-gray-100 text-gray-800 hover:bg-gray-200 \
                 focus:ring-2 focus:ring-gray-300 border border-gray-200"
            }
            ButtonVariant::Outline => {
                "bg-transparent border border-gray-300 text-gray-700 \
                 hover:bg-gray-50 hover:border-gray-400 focus:ring-2 focus:ring-gray-300"
            }
            ButtonVariant::Danger => {
                "bg-white text-red-600 border border-red-300 \
                 hover:bg-red-50 focus:ring-2 focus:ring-red-300"
            }
        }
    }
}

impl ButtonSize {
    fn get_classes(&self) -> &'static str {
        match self {
            ButtonSize::Small => "px-2 py-1 text-xs",
            ButtonSize::Medium => "px-3 py-2 text-sm",
            ButtonSize::Large => "px-6 py-3 text-base",
        }
    }
}

fn button_classes(variant: ButtonVariant, size: ButtonSize, full_width: bool, class: &str) -> String {
    let base_classes =
        "inline-flex items-center justify-center font-medium rounded-lg transition-colors duration-150 focus:outline-none";
    let width_classes = if full_width { "w-full" } else { "" };

    format!(
        "{} {} {} {} {} disabled:opacity-50 disabled:cursor-not-allowed",
        base_classes,
        variant.get_classes(),
        size.get_classes(),
        width_classes,
        class
    )
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] full_width: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] on_click: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            class=button_classes(variant, size, full_width, &class)
            disabled=move || disabled.get()
            on:click=move |ev| {
                if !disabled.get_untracked() {
                    if let Some(handler) = on_click {
                        handler.run(ev);
                    }
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
pub fn LinkButton(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] class: String,
    #[prop(into)] href: String,
    children: Children,
) -> impl IntoView {
    view! {
        <a class=format!("{} no-underline", button_classes(variant, size, false, &class)) href=href>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_combine_variant_and_size() {
        let classes = button_classes(ButtonVariant::Primary, ButtonSize::Large, true, "mt-4");
        assert!(classes.contains("bg-red-600"));
        assert!(classes.contains("px-6 py-3"));
        assert!(classes.contains("w-full"));
        assert!(classes.ends_with("mt-4 disabled:opacity-50 disabled:cursor-not-allowed"));
    }

    #[test]
    fn test_outline_and_danger_variants() {
        let outline = button_classes(ButtonVariant::Outline, ButtonSize::Small, false, "");
        assert!(outline.contains("border-gray-300"));
        assert!(outline.contains("px-2 py-1 text-xs"));
        assert!(!outline.contains("w-full"));

        let danger = button_classes(ButtonVariant::Danger, ButtonSize::Medium, false, "");
        assert!(danger.contains("text-red-600"));
    }
}
