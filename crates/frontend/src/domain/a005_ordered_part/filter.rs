//! Filters of the linked orders table, read from the page URL.
//!
//! The location filters have keys of their own: the management cards own
//! `factory` / `factorySection` / `machine`, and a part picked there must
//! still show its orders from every machine.

use crate::shared::cascade::query_sync::{parse_id, parse_query, QueryMap};
use crate::shared::date_utils::{calendar_day, parse_filter_date};
use crate::shared::list_utils::RecordFilter;
use chrono::{Local, NaiveDate, TimeZone};
use contracts::domain::a005_ordered_part::aggregate::{OrderInfo, OrderedPart};
use contracts::domain::common::EntityId;

/// URL keys owned by the orders filter bar
pub const QUERY_KEY: &str = "query";
pub const REQ_NUM_KEY: &str = "reqNum";
pub const DATE_KEY: &str = "date";
pub const FACTORY_KEY: &str = "orderFactory";
pub const SECTION_KEY: &str = "orderSection";
pub const MACHINE_KEY: &str = "orderMachine";
/// Older order links used `section` for the factory section
const LEGACY_SECTION_KEY: &str = "section";

/// Every key [`OrderFilter`] reads; resetting the filter removes exactly these.
pub const FILTER_KEYS: [&str; 7] = [
    QUERY_KEY,
    REQ_NUM_KEY,
    DATE_KEY,
    FACTORY_KEY,
    SECTION_KEY,
    LEGACY_SECTION_KEY,
    MACHINE_KEY,
];

/// Drop every filter key, keep everything else (selection included).
pub fn clear_filters(map: &mut QueryMap) {
    for key in FILTER_KEYS {
        map.remove(key);
    }
}

/// Set or clear one location filter. Writing the section replaces the
/// legacy key so the two cannot disagree.
pub fn set_location(map: &mut QueryMap, key: &str, id: Option<EntityId>) {
    if key == SECTION_KEY {
        map.remove(LEGACY_SECTION_KEY);
    }
    match id {
        Some(id) => {
            map.insert(key.to_string(), id.to_string());
        }
        None => {
            map.remove(key);
        }
    }
}

/// Distinct location ids present in `lines`, ascending.
pub fn location_ids(lines: &[OrderedPart], pick: fn(&OrderInfo) -> Option<EntityId>) -> Vec<EntityId> {
    let mut ids: Vec<EntityId> = lines.iter().filter_map(|line| pick(&line.order)).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Clone, Debug)]
pub struct OrderFilter<Tz: TimeZone = Local> {
    /// Exact order id, as typed
    pub query: Option<String>,
    pub req_num: Option<String>,
    pub date: Option<NaiveDate>,
    pub factory: Option<EntityId>,
    pub factory_section: Option<EntityId>,
    pub machine: Option<EntityId>,
    /// Zone in which order timestamps are turned into calendar days
    pub tz: Tz,
}

fn text(map: &QueryMap, key: &str) -> Option<String> {
    map.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl OrderFilter<Local> {
    pub fn from_query(search: &str) -> Self {
        Self::from_query_in(search, Local)
    }
}

impl<Tz: TimeZone> OrderFilter<Tz> {
    pub fn from_query_in(search: &str, tz: Tz) -> Self {
        let map = parse_query(search);
        Self {
            query: text(&map, QUERY_KEY),
            req_num: text(&map, REQ_NUM_KEY),
            date: map.get(DATE_KEY).and_then(|v| parse_filter_date(v, &tz)),
            factory: parse_id(&map, FACTORY_KEY),
            factory_section: parse_id(&map, SECTION_KEY)
                .or_else(|| parse_id(&map, LEGACY_SECTION_KEY)),
            machine: parse_id(&map, MACHINE_KEY),
            tz,
        }
    }
}

impl<Tz: TimeZone> RecordFilter<OrderedPart> for OrderFilter<Tz> {
    fn matches(&self, part: &OrderedPart) -> bool {
        let order = &part.order;
        let query_ok = self
            .query
            .as_ref()
            .map_or(true, |q| part.order_id.to_string() == *q);
        let req_num_ok = self
            .req_num
            .as_ref()
            .map_or(true, |r| order.req_num.as_deref() == Some(r.as_str()));
        let date_ok = self
            .date
            .map_or(true, |d| calendar_day(&order.created_at, &self.tz) == d);
        let factory_ok = self.factory.map_or(true, |id| order.factory_id == Some(id));
        let section_ok = self
            .factory_section
            .map_or(true, |id| order.factory_section_id == Some(id));
        let machine_ok = self.machine.map_or(true, |id| order.machine_id == Some(id));

        query_ok && req_num_ok && date_ok && factory_ok && section_ok && machine_ok
    }

    fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    fn active_count(&self) -> usize {
        [
            self.query.is_some(),
            self.req_num.is_some(),
            self.date.is_some(),
            self.factory.is_some(),
            self.factory_section.is_some(),
            self.machine.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::query_sync::to_query;
    use crate::shared::cascade::Selection;
    use crate::shared::list_utils::filter_list;
    use chrono::{DateTime, FixedOffset, Utc};
    use contracts::domain::a005_ordered_part::aggregate::OrderInfo;

    fn line(
        id: EntityId,
        order_id: EntityId,
        created_at: &str,
        req_num: &str,
        factory: EntityId,
        section: EntityId,
        machine: EntityId,
    ) -> OrderedPart {
        OrderedPart {
            id,
            order_id,
            part_id: 77,
            qty: Some(1),
            purchased_date: None,
            sent_to_factory_date: None,
            received_by_factory_date: None,
            order: OrderInfo {
                id: order_id,
                created_at: DateTime::parse_from_rfc3339(created_at)
                    .unwrap()
                    .with_timezone(&Utc),
                req_num: Some(req_num.to_string()),
                factory_id: Some(factory),
                factory_section_id: Some(section),
                machine_id: Some(machine),
            },
        }
    }

    fn records() -> Vec<OrderedPart> {
        vec![
            line(1, 100, "2024-03-01T08:00:00Z", "R1", 2, 20, 200),
            line(2, 101, "2024-03-01T21:45:00Z", "R2", 1, 10, 100),
            line(3, 102, "2024-03-02T09:00:00Z", "R1", 2, 21, 201),
            line(4, 103, "2024-03-01T13:30:00Z", "R3", 2, 21, 202),
        ]
    }

    fn utc_filter(search: &str) -> OrderFilter<Utc> {
        OrderFilter::from_query_in(search, Utc)
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let f = utc_filter("");
        assert!(f.is_empty());
        assert_eq!(filter_list(&records(), &f), records());
        // unrelated keys and empty values are no constraint either
        assert_eq!(filter_list(&records(), &utc_filter("?query=&date=&other=1")), records());
    }

    #[test]
    fn test_date_and_factory_together() {
        let f = utc_filter("?date=2024-03-01&orderFactory=2");
        let ids: Vec<EntityId> = filter_list(&records(), &f).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_date_compares_local_calendar_day() {
        // 21:45 UTC on the 1st is already the 2nd at UTC+3
        let f = OrderFilter::from_query_in("date=2024-03-02", FixedOffset::east_opt(3 * 3600).unwrap());
        let ids: Vec<EntityId> = filter_list(&records(), &f).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_every_criterion_must_match() {
        let f = utc_filter(
            "query=102&reqNum=R1&orderFactory=2&orderSection=21&orderMachine=201&date=2024-03-02",
        );
        assert_eq!(f.active_count(), 6);
        let out = filter_list(&records(), &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 3);

        let f = utc_filter("query=102&orderMachine=200");
        assert!(filter_list(&records(), &f).is_empty());
    }

    #[test]
    fn test_req_num_and_legacy_section_key() {
        let f = utc_filter("reqNum=R1&section=20");
        let ids: Vec<EntityId> = filter_list(&records(), &f).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_unparseable_date_is_ignored() {
        let f = utc_filter("date=soon");
        assert_eq!(f.date, None);
        assert_eq!(filter_list(&records(), &f).len(), 4);
    }

    #[test]
    fn test_part_picked_in_cascade_shows_orders_from_every_machine() {
        // factory 2 -> section 21 -> machine 201 -> part 77 in the cards
        let selection = Selection::from_parts(Some(2), Some(21), Some(201), Some(77));
        let search = selection.write_query("");
        let f = utc_filter(&search);
        assert!(f.is_empty());
        assert_eq!(filter_list(&records(), &f), records());
    }

    #[test]
    fn test_clear_filters_keeps_selection() {
        let mut map = parse_query(
            "factory=2&machine=201&part=77&query=102&reqNum=R1&date=2024-03-02\
             &orderFactory=2&section=21&orderMachine=201",
        );
        assert_eq!(utc_filter(&to_query(&map)).active_count(), 6);

        clear_filters(&mut map);
        assert_eq!(utc_filter(&to_query(&map)).active_count(), 0);
        assert_eq!(Selection::from_query_map(&map), Selection::from_parts(Some(2), None, Some(201), Some(77)));
    }

    #[test]
    fn test_location_ids_are_distinct_and_sorted() {
        let ids = location_ids(&records(), |o| o.factory_section_id);
        assert_eq!(ids, vec![10, 20, 21]);
    }

    #[test]
    fn test_set_section_replaces_legacy_key() {
        let mut map = parse_query("part=77&section=21");
        set_location(&mut map, SECTION_KEY, Some(22));
        assert_eq!(utc_filter(&to_query(&map)).factory_section, Some(22));

        set_location(&mut map, SECTION_KEY, None);
        assert_eq!(utc_filter(&to_query(&map)).factory_section, None);
        assert_eq!(to_query(&map), "part=77");
    }
}
