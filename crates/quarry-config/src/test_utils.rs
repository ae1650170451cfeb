/// Runs `f` with the given environment variables set, restoring each
/// variable's previous state afterwards. Callers combine this with
/// `#[serial]` since the process environment is shared.
#[cfg(test)]
pub fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let saved: Vec<_> = vars
        .iter()
        .map(|(key, _)| (*key, std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    f();

    for (key, previous) in saved {
        match previous {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
