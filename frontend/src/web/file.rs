//! 文件读取与下载

use plantguard::classify::UploadFile;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlAnchorElement, Url};

use super::http::bytes_to_blob;

/// 读取用户选择的文件内容
pub async fn read_file(file: &File) -> Result<UploadFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("读取文件失败: {:?}", e))?;

    Ok(UploadFile {
        name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// 为本地文件生成预览地址，使用后需调用 [`revoke_object_url`]
pub fn object_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_object_url(url: &str) {
    let _ = Url::revoke_object_url(url);
}

/// 以纯文本文件形式下载内容
pub fn download_text(file_name: &str, text: &str) -> Result<(), JsValue> {
    let blob = bytes_to_blob(text.as_bytes(), "text/plain")?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("无法获取 document 对象"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}
