//! Type conversion between Arrow and dtype names.
//!
//! Datasets report their column types with the Spark-style names callers
//! write in schema specs (`bigint`, `string`, `decimal(10,2)`, ...).

use arrow_schema::{DataType, Fields, TimeUnit};

/// Converts an Arrow data type to its dtype name.
pub fn arrow_type_to_dtype(data_type: &DataType) -> String {
    match data_type {
        DataType::Null => "void".to_string(),
        DataType::Boolean => "boolean".to_string(),
        DataType::Int8 => "tinyint".to_string(),
        DataType::Int16 | DataType::UInt8 => "smallint".to_string(),
        DataType::Int32 | DataType::UInt16 => "int".to_string(),
        DataType::Int64 | DataType::UInt32 => "bigint".to_string(),
        DataType::UInt64 => "decimal(20,0)".to_string(),
        DataType::Float16 | DataType::Float32 => "float".to_string(),
        DataType::Float64 => "double".to_string(),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => "string".to_string(),
        DataType::Binary
        | DataType::LargeBinary
        | DataType::BinaryView
        | DataType::FixedSizeBinary(_) => "binary".to_string(),
        DataType::Date32 | DataType::Date64 => "date".to_string(),
        DataType::Timestamp(_, Some(_)) => "timestamp".to_string(),
        DataType::Timestamp(_, None) => "timestamp_ntz".to_string(),
        DataType::Time32(_) | DataType::Time64(_) => "time".to_string(),
        DataType::Duration(unit) => format!("interval {}", time_unit_name(unit)),
        DataType::Decimal128(precision, scale) | DataType::Decimal256(precision, scale) => {
            format!("decimal({},{})", precision, scale)
        }
        DataType::List(field)
        | DataType::LargeList(field)
        | DataType::ListView(field)
        | DataType::LargeListView(field)
        | DataType::FixedSizeList(field, _) => {
            format!("array<{}>", arrow_type_to_dtype(field.data_type()))
        }
        DataType::Struct(fields) => format!("struct<{}>", struct_members(fields)),
        DataType::Map(entries, _) => match entries.data_type() {
            DataType::Struct(kv) if kv.len() == 2 => format!(
                "map<{},{}>",
                arrow_type_to_dtype(kv[0].data_type()),
                arrow_type_to_dtype(kv[1].data_type())
            ),
            other => format!("map<{}>", arrow_type_to_dtype(other)),
        },
        DataType::Dictionary(_, value) => arrow_type_to_dtype(value),
        DataType::RunEndEncoded(_, values) => arrow_type_to_dtype(values.data_type()),
        other => other.to_string().to_lowercase(),
    }
}

fn struct_members(fields: &Fields) -> String {
    fields
        .iter()
        .map(|f| format!("{}:{}", f.name(), arrow_type_to_dtype(f.data_type())))
        .collect::<Vec<_>>()
        .join(",")
}

fn time_unit_name(unit: &TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "second",
        TimeUnit::Millisecond => "millisecond",
        TimeUnit::Microsecond => "microsecond",
        TimeUnit::Nanosecond => "nanosecond",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::Field;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_primitive_type_conversion() {
        assert_eq!(arrow_type_to_dtype(&DataType::Boolean), "boolean");
        assert_eq!(arrow_type_to_dtype(&DataType::Int32), "int");
        assert_eq!(arrow_type_to_dtype(&DataType::Int64), "bigint");
        assert_eq!(arrow_type_to_dtype(&DataType::Float64), "double");
        assert_eq!(arrow_type_to_dtype(&DataType::Utf8), "string");
        assert_eq!(arrow_type_to_dtype(&DataType::Utf8View), "string");
        assert_eq!(arrow_type_to_dtype(&DataType::Date32), "date");
        assert_eq!(arrow_type_to_dtype(&DataType::Decimal128(10, 2)), "decimal(10,2)");
    }

    #[test]
    fn test_timestamp_conversion() {
        assert_eq!(
            arrow_type_to_dtype(&DataType::Timestamp(
                TimeUnit::Microsecond,
                Some("UTC".into())
            )),
            "timestamp"
        );
        assert_eq!(
            arrow_type_to_dtype(&DataType::Timestamp(TimeUnit::Nanosecond, None)),
            "timestamp_ntz"
        );
    }

    #[test]
    fn test_nested_type_conversion() {
        let list = DataType::List(Arc::new(Field::new("item", DataType::Int64, true)));
        assert_eq!(arrow_type_to_dtype(&list), "array<bigint>");

        let strukt = DataType::Struct(Fields::from(vec![
            Field::new("a", DataType::Int32, true),
            Field::new("b", DataType::Utf8, true),
        ]));
        assert_eq!(arrow_type_to_dtype(&strukt), "struct<a:int,b:string>");

        let entries = Field::new(
            "entries",
            DataType::Struct(Fields::from(vec![
                Field::new("key", DataType::Utf8, false),
                Field::new("value", DataType::Float64, true),
            ])),
            false,
        );
        let map = DataType::Map(Arc::new(entries), false);
        assert_eq!(arrow_type_to_dtype(&map), "map<string,double>");
    }

    #[test]
    fn test_dictionary_reports_value_type() {
        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        assert_eq!(arrow_type_to_dtype(&dict), "string");
    }
}
