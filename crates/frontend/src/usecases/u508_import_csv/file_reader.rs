use super::state::UploadFile;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// First file of the `<input type="file">` that fired `ev`
pub fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Reads the whole file into memory so both calls can send the same bytes
pub async fn read_upload_file(file: web_sys::File) -> Result<UploadFile, String> {
    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    let bytes = js_sys::Uint8Array::new(&array_buffer).to_vec();

    Ok(UploadFile::new(file.name(), file.type_(), bytes))
}
