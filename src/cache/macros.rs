/// A macro to simplify caching logic using Redis.
///
/// Checks the cache for the key first. On a hit the cached value is
/// returned; on a miss the block runs, its result is queued for a
/// background write, and the fresh value is returned. Either path yields
/// the same value, so cold and warm caches are observationally identical.
///
/// # Arguments
/// * `$cache`: The cache instance, exposing `get_from_cache` and
///   `set_in_background`.
/// * `$key`: The `CacheKey` for this operation + parameter set.
/// * `$ttl`: The time-to-live for the cached value in seconds.
/// * `$block`: The block of code to execute if the value is not cached.
///
/// # Example
/// ```rust,ignore
/// let page = cached!(cache, cache_key, DISCOVER_CACHE_TTL, async move {
///     fetch_discovery_page().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        // Attempt to get the value from cache
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            // If not in cache, execute the block to compute the value
            let value = $block.await?;
            // Store the computed value in cache
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
