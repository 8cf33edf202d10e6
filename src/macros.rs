/// Builds a [`DashDb`](crate::DashDb) from literal composite keys.
///
/// Keys are stored as written, without validation; values are anything that
/// implements [`ToDashValue`](crate::ToDashValue).
///
/// ```rust
/// use dashdb::dash;
///
/// let db = dash!({
///     "kernels-0-name": "update_positions",
///     "kernels-0-arguments-0-element size": 32,
///     "kernels-1-name": "update_speed",
/// });
///
/// assert_eq!(db.key("kernels").length(), 2);
/// assert_eq!(db.get("kernels-0-arguments-0-element size"), Some("32"));
/// ```
#[macro_export]
macro_rules! dash {
    () => {
        $crate::DashDb::new()
    };

    ({}) => {
        $crate::DashDb::new()
    };

    ({ $($key:literal : $value:expr),* $(,)? }) => {{
        let mut db = $crate::DashDb::new();
        $(
            db.insert_unchecked($key, $value);
        )*
        db
    }};
}
