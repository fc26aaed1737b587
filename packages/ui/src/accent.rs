use content::{average_color, AccentPalette};
use dioxus::prelude::*;

const PROFILE_IMAGE_ID: &str = "profile-image";

/// RGBA pixels of the image element `id`, read back through a canvas.
#[cfg(target_arch = "wasm32")]
fn sample_image(id: &str) -> Result<Vec<u8>, String> {
    use web_sys::wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let image = document
        .get_element_by_id(id)
        .ok_or("image not found")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| "not an image element")?;
    let (width, height) = (image.natural_width(), image.natural_height());
    if width == 0 || height == 0 {
        return Err("image has no pixels".to_string());
    }

    let canvas = document
        .create_element("canvas")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| "not a canvas element")?;
    canvas.set_width(width);
    canvas.set_height(height);
    let context = canvas
        .get_context("2d")
        .map_err(|e| format!("{e:?}"))?
        .ok_or("no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "not a 2d context")?;
    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|e| format!("{e:?}"))?;
    // Throws on a cross-origin image without CORS headers.
    let data = context
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| format!("{e:?}"))?;
    Ok(data.data().0)
}

#[cfg(not(target_arch = "wasm32"))]
fn sample_image(_id: &str) -> Result<Vec<u8>, String> {
    Err("no canvas outside the browser".to_string())
}

fn apply_palette(palette: AccentPalette) {
    let statements: String = palette
        .properties()
        .iter()
        .map(|(name, value)| format!(r#"root.style.setProperty("{name}", "{value}");"#))
        .collect();
    spawn(async move {
        let _ = document::eval(&format!(
            "(function(){{ const root = document.documentElement; {statements} return \"\"; }})()"
        ))
        .await;
    });
}

/// Profile picture whose average colour becomes the page accent.
#[component]
pub fn ProfileImage(src: String, alt: String) -> Element {
    let on_load = move |_: ImageEvent| {
        let palette = match sample_image(PROFILE_IMAGE_ID) {
            Ok(pixels) => average_color(&pixels)
                .map(AccentPalette::from_color)
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!("accent.sample: {e}");
                AccentPalette::default()
            }
        };
        tracing::debug!("accent.apply: {}", palette.accent);
        apply_palette(palette);
    };

    rsx! {
        img {
            id: PROFILE_IMAGE_ID,
            class: "profile-image",
            src: "{src}",
            alt: "{alt}",
            "crossorigin": "anonymous",
            onload: on_load,
            onerror: move |_| apply_palette(AccentPalette::default()),
        }
    }
}
