use apprenti::errors::AppError;
use apprenti::models::AudioClip;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAudioElement, Url};

/// Wraps synthesized bytes in an object URL and a detached `<audio>`
/// element; `on_ended` runs every time playback finishes.
pub fn bind_clip(
    clip: &AudioClip,
    on_ended: impl Fn() + 'static,
) -> Result<HtmlAudioElement, AppError> {
    let bytes = js_sys::Uint8Array::from(clip.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&clip.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Unexpected(format!("Blob creation failed: {e:?}")))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Unexpected(format!("Object URL failed: {e:?}")))?;
    let audio = HtmlAudioElement::new_with_src(&url)
        .map_err(|e| AppError::Unexpected(format!("Audio element failed: {e:?}")))?;

    // The closure lives as long as the page, like the cached audio.
    let onended = Closure::<dyn Fn()>::new(on_ended);
    audio.set_onended(Some(onended.as_ref().unchecked_ref()));
    onended.forget();

    Ok(audio)
}

/// Starts playback; a refused `play()` promise is logged.
pub fn play(audio: &HtmlAudioElement) {
    match audio.play() {
        Ok(promise) => {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::error!("Audio playback refused: {e:?}");
                }
            });
        }
        Err(e) => log::error!("Audio playback failed: {e:?}"),
    }
}

pub fn pause(audio: &HtmlAudioElement) {
    if let Err(e) = audio.pause() {
        log::error!("Audio pause failed: {e:?}");
    }
}
