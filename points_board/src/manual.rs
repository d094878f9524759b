/*!

# Input format reference

The library consumes the CSV exports that a shared spreadsheet publishes,
one sheet per point category (attendance, speeches, roles, awards, and so
on). All sheets follow the same shape, up to per-sheet layout parameters:

```text
Member  , Total , 12-Jul-25 , 26-Jul-25 , 9-Aug-25
        ,       , 12        , 13        , 14
Alice   , 10    , 5         , 0         , 5
Bob     , 3     , 1         , 1         , 1
```

- The first header row carries the meeting dates in the `D-Mon-YY`
  convention (`12-Jul-25` is 2025-07-12; two-digit years below 50 belong to
  the 2000s, the rest to the 1900s). A header cell that is not a date in
  this shape is not a meeting column and is skipped.
- The second header row carries optional meeting-number labels.
- The leading columns (member name, running total) are never scanned for
  dates; [`SheetLayout::first_point_column`] says where the meeting columns
  start.
- Data rows start right after the header rows. The first cell is the member
  name; rows with a blank first cell are separators and are skipped.
- A point cell that is blank or not a number counts as zero. The system
  cannot tell a missing point from a zero point, by construction.

Summary sheets (`Total` in the source spreadsheet) keep a pre-summed score
per member instead of meaningful dated columns. Declare the column through
[`SheetLayout::stored_total_column`]; the stored score is then used whenever
no date filter narrower than "all" is requested.

# Querying

Normalization produces one [`CategoryTable`] per sheet. A set of tables
plus the name of the leaderboard category form a [`Snapshot`], the unit of
data loading: build one per load, query it freely, rebuild it wholesale to
refresh.

Queries take a [`timeline::DateRange`], obtained from
[`timeline::resolve_range`] out of either explicit bounds or a named period
(`month` and `quarter` are trailing windows ending today). Filtering is
inclusive on both bounds and columns without a parseable date are never in
range.

The [`present`] module turns query results into the three render-ready
views: the per-member detail table, the ranked leaderboard and the top-N
chart series.

[`CategoryTable`]: crate::CategoryTable
[`Snapshot`]: crate::Snapshot
[`SheetLayout::first_point_column`]: crate::SheetLayout
[`SheetLayout::stored_total_column`]: crate::SheetLayout
[`timeline::DateRange`]: crate::timeline::DateRange
[`timeline::resolve_range`]: crate::timeline::resolve_range
[`present`]: crate::present

*/
