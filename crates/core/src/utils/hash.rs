//! Deterministic identity for a build, derived from its logical inputs

/// Hash an ordered sequence of strings into a fixed-width hex digest.
///
/// The parts are concatenated without a separator before hashing, so
/// ordering matters but grouping does not.
pub fn hash_parts<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: String = parts.into_iter().map(|p| p.as_ref().to_owned()).collect();
    format!("{:x}", md5::compute(joined.as_bytes()))
}
