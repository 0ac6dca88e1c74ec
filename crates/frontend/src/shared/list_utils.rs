/// Утилиты для фильтрации списков в таблицах

/// Набор условий фильтрации для записей типа `T`.
///
/// An unset condition must match every record, so the default criteria of any
/// implementor is the identity filter.
pub trait RecordFilter<T> {
    /// Проверяет, проходит ли запись все заданные условия
    fn matches(&self, record: &T) -> bool;

    /// No condition set
    fn is_empty(&self) -> bool;

    /// Number of conditions set, for the filter badge
    fn active_count(&self) -> usize;
}

/// Фильтрует список, сохраняя исходный порядок записей
pub fn filter_list<T, F>(items: &[T], filter: &F) -> Vec<T>
where
    T: Clone,
    F: RecordFilter<T>,
{
    if filter.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}
