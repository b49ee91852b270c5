/// A selectable column type: the label shown to the user and the keyword(s)
/// emitted into DDL. The two differ only where PostgreSQL accepts a shorter
/// spelling (`char`, `varchar`, `double precision`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeSpec {
    pub label: &'static str,
    pub query_name: &'static str,
}

const fn ty(label: &'static str, query_name: &'static str) -> ColumnTypeSpec {
    ColumnTypeSpec { label, query_name }
}

/// The built-in scalar, geometric, network, and text types offered when
/// adding a column. Read-only reference data.
pub static COLUMN_TYPES: &[ColumnTypeSpec] = &[
    ty("bigint", "bigint"),
    ty("bigserial", "bigserial"),
    ty("bit", "bit"),
    ty("bit varying", "bit varying"),
    ty("boolean", "boolean"),
    ty("box", "box"),
    ty("bytea", "bytea"),
    ty("character", "char"),
    ty("character varying", "varchar"),
    ty("cidr", "cidr"),
    ty("circle", "circle"),
    ty("date", "date"),
    ty("double", "double precision"),
    ty("inet", "inet"),
    ty("integer", "integer"),
    ty("interval", "interval"),
    ty("json", "json"),
    ty("jsonb", "jsonb"),
    ty("line", "line"),
    ty("lseg", "lseg"),
    ty("macaddr", "macaddr"),
    ty("money", "money"),
    ty("numeric", "numeric"),
    ty("path", "path"),
    ty("pg_lsn", "pg_lsn"),
    ty("point", "point"),
    ty("polygon", "polygon"),
    ty("real", "real"),
    ty("smallint", "smallint"),
    ty("smallserial", "smallserial"),
    ty("serial", "serial"),
    ty("text", "text"),
    ty("time without time zone", "time without time zone"),
    ty("time with time zone", "time with time zone"),
    ty("timestamp without time zone", "timestamp without time zone"),
    ty("timestamp with time zone", "timestamp with time zone"),
    ty("tsquery", "tsquery"),
    ty("tsvector", "tsvector"),
    ty("txid_snapshot", "txid_snapshot"),
    ty("uuid", "uuid"),
    ty("xml", "xml"),
];

pub fn column_type_by_label(label: &str) -> Option<&'static ColumnTypeSpec> {
    COLUMN_TYPES.iter().find(|spec| spec.label == label)
}
