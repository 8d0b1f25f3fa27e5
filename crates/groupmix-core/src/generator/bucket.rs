use crate::models::Person;

/// Bucket key shared by everyone without a family number
pub const DEFAULT_BUCKET: u32 = 0;

/// Split `people` into buckets.
///
/// With `by_network`, people are keyed by family number and buckets come
/// out in order of first appearance. Otherwise everyone shares one bucket.
pub fn split_buckets(people: Vec<Person>, by_network: bool) -> Vec<Vec<Person>> {
    if !by_network {
        return if people.is_empty() { Vec::new() } else { vec![people] };
    }

    let mut buckets: Vec<(u32, Vec<Person>)> = Vec::new();
    for person in people {
        let key = person.family_number.unwrap_or(DEFAULT_BUCKET);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(person),
            None => buckets.push((key, vec![person])),
        }
    }
    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}
