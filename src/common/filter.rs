// src/common/filter.rs

/// Filtro local por substring, sem diferenciar maiúsculas.
/// Filtro vazio (ou só espaços) devolve a lista inteira.
pub fn filter_by<'a, T, F>(items: &'a [T], query: &str, text_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> String,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| text_of(item).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_substring_and_restores_on_clear() {
        let lotes = vec!["L-001", "L-002", "X-100"];
        let found = filter_by(&lotes, "l-00", |s| s.to_string());
        assert_eq!(found, vec![&"L-001", &"L-002"]);

        let all = filter_by(&lotes, "  ", |s| s.to_string());
        assert_eq!(all.len(), 3);
    }
}
