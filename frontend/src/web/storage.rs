//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 [`KeyValueStore`] 接口。

use plantguard::error::{ClientError, ClientResult};
use plantguard::storage::KeyValueStore;

/// 浏览器本地存储
///
/// 每次操作时重新获取 `localStorage`，结构体本身不持有 JS 对象。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> ClientResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| ClientError::storage("localStorage 不可用"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ClientError::storage(format!("读取 {} 失败: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::storage(format!("写入 {} 失败: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ClientError::storage(format!("删除 {} 失败: {:?}", key, e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let store = BrowserStorage;
        store.set("plantguard-test", "v").unwrap();
        assert_eq!(store.get("plantguard-test").unwrap().as_deref(), Some("v"));
        store.remove("plantguard-test").unwrap();
        assert_eq!(store.get("plantguard-test").unwrap(), None);
    }
}
