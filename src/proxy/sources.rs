//! Built-in proxy source lists keyed by category

use crate::proxy::models::ProxyCategory;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Built-in category to source-URL table
static BUILTIN_SOURCES: Lazy<HashMap<ProxyCategory, Vec<String>>> = Lazy::new(|| {
    let mut sources = HashMap::new();
    sources.insert(
        ProxyCategory::Http,
        to_owned(&[
            "https://api.openproxylist.xyz/http.txt",
            "https://alexa.lr2b.com/proxylist.txt",
            "https://rootjazz.com/proxies/proxies.txt",
            "https://www.proxy-list.download/api/v1/get?type=http",
            "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/http/http.txt",
            "https://raw.githubusercontent.com/monosans/proxy-list/main/proxies/http.txt",
            "https://api.proxyscrape.com/v2/?request=displayproxies&protocol=http&timeout=10000&country=all&ssl=all&anonymity=all",
            "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/http.txt",
        ]),
    );
    sources.insert(
        ProxyCategory::Https,
        to_owned(&[
            "https://www.sslproxies.org/",
            "https://www.proxy-list.download/api/v1/get?type=https",
            "https://api.proxyscrape.com/v2/?request=displayproxies&protocol=https&timeout=10000&country=all&ssl=all&anonymity=all",
            "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/https/https.txt",
            "https://raw.githubusercontent.com/jetkai/proxy-list/main/online-proxies/txt/proxies-https.txt",
        ]),
    );
    sources.insert(
        ProxyCategory::Socks4,
        to_owned(&[
            "https://api.openproxylist.xyz/socks4.txt",
            "https://www.proxy-list.download/api/v1/get?type=socks4",
            "https://www.socks-proxy.net/",
            "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/socks4/socks4.txt",
            "https://raw.githubusercontent.com/monosans/proxy-list/main/proxies/socks4.txt",
            "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/socks4.txt",
            "https://api.proxyscrape.com/v2/?request=displayproxies&protocol=SOCKS4&timeout=10000&country=all&ssl=all&anonymity=all",
            "https://raw.githubusercontent.com/rdavydov/proxy-list/main/proxies_anonymous/socks4.txt",
        ]),
    );
    sources.insert(
        ProxyCategory::Socks5,
        to_owned(&[
            "https://www.proxy-list.download/api/v1/get?type=socks5",
            "https://api.openproxylist.xyz/socks5.txt",
            "https://raw.githubusercontent.com/officialputuid/KangProxy/KangProxy/socks5/socks5.txt",
            "https://raw.githubusercontent.com/monosans/proxy-list/main/proxies/socks5.txt",
            "https://raw.githubusercontent.com/elliottophellia/yakumo/master/results/socks5/global/socks5_checked.txt",
            "https://raw.githubusercontent.com/ErcinDedeoglu/proxies/main/proxies/socks5.txt",
            "https://raw.githubusercontent.com/TheSpeedX/SOCKS-List/master/socks5.txt",
            "https://raw.githubusercontent.com/rdavydov/proxy-list/main/proxies_anonymous/socks5.txt",
            "https://api.proxyscrape.com/v2/?request=displayproxies&protocol=SOCKS5&timeout=10000&country=all&ssl=all&anonymity=all",
            "https://raw.githubusercontent.com/jetkai/proxy-list/main/online-proxies/txt/proxies-socks5.txt",
        ]),
    );
    sources
});

fn to_owned(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|url| url.to_string()).collect()
}

/// Read-only registry of source URLs per proxy category.
///
/// Injected into the loader at construction so tests can point it at
/// stub servers.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: HashMap<ProxyCategory, Vec<String>>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self {
            sources: BUILTIN_SOURCES.clone(),
        }
    }
}

impl SourceRegistry {
    /// Create a registry from an explicit category to URL-list mapping
    pub fn new(sources: HashMap<ProxyCategory, Vec<String>>) -> Self {
        Self { sources }
    }

    /// Source URLs configured for a category
    pub fn urls(&self, category: ProxyCategory) -> &[String] {
        self.sources
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_covers_all_categories() {
        let registry = SourceRegistry::default();
        for category in ProxyCategory::ALL {
            assert!(!registry.urls(category).is_empty());
        }
    }

    #[test]
    fn test_builtin_urls_are_https() {
        let registry = SourceRegistry::default();
        for category in ProxyCategory::ALL {
            for url in registry.urls(category) {
                assert!(url.starts_with("https://"), "unexpected url: {}", url);
            }
        }
    }

    #[test]
    fn test_custom_registry() {
        let mut sources = HashMap::new();
        sources.insert(
            ProxyCategory::Socks5,
            vec!["https://example.com/socks5.txt".to_string()],
        );
        let registry = SourceRegistry::new(sources);

        assert_eq!(registry.urls(ProxyCategory::Socks5).len(), 1);
        assert!(registry.urls(ProxyCategory::Http).is_empty());
    }
}
