//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`] 接口，
//! multipart 请求体通过 `FormData` 构造，由浏览器生成 boundary。

use async_trait::async_trait;
use plantguard::error::{ClientError, ClientResult};
use plantguard::request::{HttpClient, HttpRequest, HttpResponse, MultipartFile, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestCredentials, RequestInit, Response};

fn js_error(context: &'static str) -> impl Fn(JsValue) -> ClientError {
    move |e| ClientError::network(format!("{}: {:?}", context, e))
}

/// 将字节包装为带类型的 Blob
pub fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

fn multipart_body(file: &MultipartFile) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    let blob = bytes_to_blob(&file.bytes, &file.content_type)?;
    form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)?;
    Ok(form)
}

/// 浏览器 fetch 客户端
///
/// 发往后端的请求携带 Cookie（后端同时使用 Cookie 与 Bearer 认证），
/// 其它地址（分类服务、图片 CDN）不携带。
#[derive(Debug, Clone)]
pub struct FetchClient {
    credentialed_prefix: String,
}

impl FetchClient {
    pub fn new(credentialed_prefix: impl Into<String>) -> Self {
        Self {
            credentialed_prefix: credentialed_prefix.into(),
        }
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new().map_err(js_error("创建 Headers 失败"))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(js_error("设置 Header 失败"))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if req.url.starts_with(&self.credentialed_prefix) {
            opts.set_credentials(RequestCredentials::Include);
        }

        match &req.body {
            Some(RequestBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(RequestBody::Multipart(file)) => {
                let form = multipart_body(file).map_err(js_error("构建表单失败"))?;
                opts.set_body(&form.into());
            }
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(js_error("请求构建失败"))?;

        let window =
            web_sys::window().ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error("网络错误"))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(js_error("Response 类型转换失败"))?;

        let buffer = JsFuture::from(response.array_buffer().map_err(js_error("读取响应失败"))?)
            .await
            .map_err(js_error("读取响应失败"))?;

        Ok(HttpResponse {
            status: response.status(),
            body: js_sys::Uint8Array::new(&buffer).to_vec(),
        })
    }
}
