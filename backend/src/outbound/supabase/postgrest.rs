//! PostgREST query-string construction.
//!
//! Pure helpers turning a [`ListRequest`] into PostgREST parameters. The
//! keyset filter for a cursor `(v, id)` on column `col` is
//!
//! ```text
//! and=(or(col.gt."v",and(col.eq."v",id.gt.<id>)))
//! ```
//!
//! with `lt` replacing the first `gt` for descending order. The identifier
//! comparison stays `gt` because ties always break by ascending id.

use pagination::SortOrder;

use crate::domain::{ListRequest, SortColumn};

/// Quote a value for use inside a PostgREST logical filter.
pub(crate) fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', r"\\").replace('"', "\\\""))
}

/// `order` parameter value: primary column, then id ascending.
pub(crate) fn order_param(column: &str, order: SortOrder) -> String {
    format!("{column}.{},id.asc", order.as_str())
}

/// `and` parameter value restricting rows to those after the cursor.
pub(crate) fn keyset_filter(column: &str, order: SortOrder, sort_value: &str, id: &str) -> String {
    let op = match order {
        SortOrder::Asc => "gt",
        SortOrder::Desc => "lt",
    };
    let value = quote(sort_value);
    format!("(or({column}.{op}.{value},and({column}.eq.{value},id.gt.{id})))")
}

/// `or` parameter value matching `term` case-insensitively in any column.
pub(crate) fn search_filter(columns: &[&str], term: &str) -> String {
    let pattern = quote(&format!("*{term}*"));
    let clauses: Vec<String> = columns
        .iter()
        .map(|column| format!("{column}.ilike.{pattern}"))
        .collect();
    format!("({})", clauses.join(","))
}

/// Query parameters for one page of a list request.
///
/// `search_columns` names the text columns the `q` term is matched against.
pub(crate) fn list_params<S: SortColumn>(
    request: &ListRequest<S>,
    search_columns: &[&str],
    soft_deletes: bool,
) -> Vec<(&'static str, String)> {
    let column = request.sort.column();
    let mut params = vec![("select", "*".to_owned())];
    if soft_deletes && !request.include_deleted {
        params.push(("deleted_at", "is.null".to_owned()));
    }
    if let Some(term) = request.search.as_deref() {
        params.push(("or", search_filter(search_columns, term)));
    }
    if let Some(cursor) = &request.cursor {
        params.push((
            "and",
            keyset_filter(column, request.order, cursor.sort_value(), cursor.id()),
        ));
    }
    params.push(("order", order_param(column, request.order)));
    params.push(("limit", request.limit.lookahead().to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RodSort, TripSort};
    use pagination::{CursorData, PageLimit};
    use rstest::rstest;

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[rstest]
    fn ascending_name_filter() {
        assert_eq!(
            keyset_filter("name", SortOrder::Asc, "Pike rod", ID),
            format!(r#"(or(name.gt."Pike rod",and(name.eq."Pike rod",id.gt.{ID})))"#)
        );
    }

    #[rstest]
    fn descending_timestamp_filter_keeps_ascending_id() {
        assert_eq!(
            keyset_filter("started_at", SortOrder::Desc, "2026-05-01T06:30:00.000000Z", ID),
            format!(
                r#"(or(started_at.lt."2026-05-01T06:30:00.000000Z",and(started_at.eq."2026-05-01T06:30:00.000000Z",id.gt.{ID})))"#
            )
        );
    }

    #[rstest]
    #[case("plain", r#""plain""#)]
    #[case(r#"say "hi""#, r#""say \"hi\"""#)]
    #[case(r"back\slash", r#""back\\slash""#)]
    #[case("a,b(c)", r#""a,b(c)""#)]
    fn quoting_escapes_reserved_characters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(quote(raw), expected);
    }

    #[rstest]
    fn order_always_ends_with_id_ascending() {
        assert_eq!(order_param("title", SortOrder::Desc), "title.desc,id.asc");
    }

    #[rstest]
    fn first_page_params() {
        let request = ListRequest::<RodSort>::default();
        let params = list_params(&request, &["name"], true);
        assert_eq!(
            params,
            vec![
                ("select", "*".to_owned()),
                ("deleted_at", "is.null".to_owned()),
                ("order", "name.asc,id.asc".to_owned()),
                ("limit", "21".to_owned()),
            ]
        );
    }

    #[rstest]
    fn cursor_and_search_params() {
        let request = ListRequest {
            search: Some("lech".into()),
            include_deleted: true,
            limit: PageLimit::new(5).expect("limit"),
            cursor: Some(CursorData::new("2026-05-01T06:30:00.000000Z", ID)),
            sort: TripSort::StartedAt,
            order: SortOrder::Desc,
        };
        let params = list_params(&request, &["title", "location_name"], true);
        assert_eq!(
            params,
            vec![
                ("select", "*".to_owned()),
                (
                    "or",
                    r#"(title.ilike."*lech*",location_name.ilike."*lech*")"#.to_owned()
                ),
                (
                    "and",
                    keyset_filter("started_at", SortOrder::Desc, "2026-05-01T06:30:00.000000Z", ID)
                ),
                ("order", "started_at.desc,id.asc".to_owned()),
                ("limit", "6".to_owned()),
            ]
        );
    }
}
