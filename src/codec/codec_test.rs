#[cfg(test)]
mod test {
    use crate::codec::read_stream::ReadStream;
    use crate::codec::write_stream::WriteStream;
    use crate::codec::Processor;
    use crate::error::Error;
    use crate::field_type::FieldType;
    use crate::record::Record;
    use crate::schema::Schema;
    use anyhow::Result;
    use std::sync::Arc;

    fn single_field_schema(tag: &str, field_type: FieldType) -> Arc<Schema> {
        let mut schema = Schema::new();
        schema.add_field(tag, field_type).unwrap();
        Arc::new(schema)
    }

    #[test]
    fn int_field_is_key_then_big_endian_payload() -> Result<()> {
        let schema = single_field_schema("v", FieldType::Int);
        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_int("v", 0x01020304)?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&rec)?;
        assert_eq!(bytes, vec![0x00, 0x01, 0x02, 0x03, 0x04]);

        let mut decoded = Record::new(schema);
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded, rec);
        assert_eq!(decoded.first("v").unwrap().as_int()?, 0x01020304);
        Ok(())
    }

    #[test]
    fn string_field_carries_its_length() -> Result<()> {
        let schema = single_field_schema("s", FieldType::Str);
        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_string("s", "hi")?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&rec)?;
        assert_eq!(bytes, vec![0x00, 0x00, 0x02, 0x68, 0x69]);

        let mut decoded = Record::new(schema);
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded.first("s").unwrap().as_string()?, "hi");
        Ok(())
    }

    #[test]
    fn fixed_and_variable_fields_concatenate_in_insertion_order() -> Result<()> {
        let mut schema = Schema::new();
        schema.add_field("b", FieldType::Bool)?;
        schema.add_field("r", FieldType::Raw)?;
        let schema = Arc::new(schema);

        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_bool("b", true)?;
        rec.add_bytes("r", &[0xAA, 0xBB, 0xCC])?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&rec)?;
        assert_eq!(
            bytes,
            vec![0x00, 0x01, 0x01, 0x00, 0x03, 0xAA, 0xBB, 0xCC]
        );

        let mut decoded = Record::new(schema);
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded, rec);
        Ok(())
    }

    #[test]
    fn nested_record_is_length_prefixed_like_any_variable_field() -> Result<()> {
        let inner_schema = single_field_schema("x", FieldType::Byte);
        let mut outer_schema = Schema::new();
        outer_schema.add_struct("inner", Arc::clone(&inner_schema))?;
        let outer_schema = Arc::new(outer_schema);

        let mut inner = Record::new(Arc::clone(&inner_schema));
        inner.add_byte("x", 0x7F)?;
        let mut outer = Record::new(Arc::clone(&outer_schema));
        outer.add_struct("inner", inner)?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&outer)?;
        assert_eq!(bytes, vec![0x00, 0x00, 0x02, 0x00, 0x7F]);

        let mut decoded = Record::new(outer_schema);
        processor.decode(&bytes, &mut decoded)?;
        let nested = decoded.first("inner").unwrap().as_struct()?;
        assert_eq!(nested.first("x").unwrap().as_byte()?, 0x7F);
        assert_eq!(decoded, outer);
        Ok(())
    }

    #[test]
    fn encoding_does_not_disturb_the_input_record() -> Result<()> {
        let inner_schema = single_field_schema("x", FieldType::Byte);
        let mut outer_schema = Schema::new();
        outer_schema.add_struct("inner", Arc::clone(&inner_schema))?;
        let outer_schema = Arc::new(outer_schema);

        let mut inner = Record::new(inner_schema);
        inner.add_byte("x", 0x7F)?;
        let mut outer = Record::new(outer_schema);
        outer.add_struct("inner", inner)?;

        let mut processor = Processor::new();
        let first = processor.encode(&outer)?;
        // The nested record is still a record, not a byte run, and a second
        // pass yields identical bytes.
        assert!(outer.first("inner").unwrap().as_struct().is_ok());
        let second = processor.encode(&outer)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn repeated_keys_round_trip_in_order() -> Result<()> {
        let schema = single_field_schema("v", FieldType::Int);
        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_int("v", 1)?;
        rec.add_int("v", 2)?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&rec)?;
        assert_eq!(
            bytes,
            vec![0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02]
        );

        let mut decoded = Record::new(schema);
        processor.decode(&bytes, &mut decoded)?;
        let values = decoded
            .all_for("v")
            .into_iter()
            .map(|f| f.as_int())
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(values, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn empty_record_encodes_to_zero_bytes() -> Result<()> {
        let schema = single_field_schema("v", FieldType::Int);
        let rec = Record::new(Arc::clone(&schema));

        let mut processor = Processor::new();
        let bytes = processor.encode(&rec)?;
        assert!(bytes.is_empty());

        let mut decoded = Record::new(schema);
        decoded.add_int("v", 9)?; // decode resets stale contents
        processor.decode(&bytes, &mut decoded)?;
        assert!(decoded.is_empty());
        Ok(())
    }

    #[test]
    fn payload_length_boundary_sits_at_65535() -> Result<()> {
        let schema = single_field_schema("r", FieldType::Raw);
        let mut processor = Processor::new();

        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_bytes("r", &vec![0x5A; 65535])?;
        let bytes = processor.encode(&rec)?;
        assert_eq!(bytes.len(), 1 + 2 + 65535);
        assert_eq!(&bytes[1..3], &[0xFF, 0xFF]);

        let mut decoded = Record::new(Arc::clone(&schema));
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded.first("r").unwrap().len(), 65535);

        let mut too_long = Record::new(schema);
        too_long.add_bytes("r", &vec![0x5A; 65536])?;
        assert_eq!(
            processor.encode(&too_long),
            Err(Error::FieldTooLong(65536))
        );
        Ok(())
    }

    #[test]
    fn truncated_payload_is_reported_with_the_deficit() {
        let schema = single_field_schema("s", FieldType::Str);
        let mut processor = Processor::new();

        // Declared length 5, one payload byte present.
        let mut decoded = Record::new(Arc::clone(&schema));
        assert_eq!(
            processor.decode(&[0x00, 0x00, 0x05, 0x68], &mut decoded),
            Err(Error::TruncatedInput { want: 5, have: 1 })
        );

        // Length prefix itself cut short.
        assert_eq!(
            processor.decode(&[0x00, 0x00], &mut decoded),
            Err(Error::TruncatedInput { want: 1, have: 0 })
        );
    }

    #[test]
    fn truncated_scalar_is_rejected() {
        let schema = single_field_schema("v", FieldType::Int);
        let mut processor = Processor::new();
        let mut decoded = Record::new(schema);
        assert_eq!(
            processor.decode(&[0x00, 0x01, 0x02], &mut decoded),
            Err(Error::TruncatedInput { want: 4, have: 2 })
        );
    }

    #[test]
    fn undeclared_key_on_the_wire_is_rejected() {
        let schema = single_field_schema("v", FieldType::Int);
        let mut processor = Processor::new();
        let mut decoded = Record::new(schema);
        assert_eq!(
            processor.decode(&[0x05, 0x00], &mut decoded),
            Err(Error::InvalidKey {
                key: 5,
                declared: 1
            })
        );
    }

    #[test]
    fn buffers_grow_past_the_expansion_increment() -> Result<()> {
        let schema = single_field_schema("r", FieldType::Raw);
        let payload = (0..10_000u32).map(|i| i as u8).collect::<Vec<_>>();
        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_bytes("r", &payload)?;

        let mut processor = Processor::with_write_capacity(16);
        let bytes = processor.encode(&rec)?;
        let mut decoded = Record::new(schema);
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded.first("r").unwrap().as_bytes(), &payload[..]);
        Ok(())
    }

    #[test]
    fn processor_stays_usable_after_a_failed_operation() -> Result<()> {
        let schema = single_field_schema("r", FieldType::Raw);
        let mut processor = Processor::new();

        let mut too_long = Record::new(Arc::clone(&schema));
        too_long.add_bytes("r", &vec![0; 70_000])?;
        assert!(processor.encode(&too_long).is_err());

        let mut rec = Record::new(Arc::clone(&schema));
        rec.add_bytes("r", &[1, 2])?;
        let bytes = processor.encode(&rec)?;
        assert_eq!(bytes, vec![0x00, 0x00, 0x02, 0x01, 0x02]);

        let mut decoded = Record::new(Arc::clone(&schema));
        assert!(processor.decode(&[0x00, 0x00], &mut decoded).is_err());
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded, rec);
        Ok(())
    }

    #[test]
    fn nesting_recurses_through_multiple_levels() -> Result<()> {
        let leaf_schema = single_field_schema("x", FieldType::Byte);
        let mut mid_schema = Schema::new();
        mid_schema.add_struct("leaf", Arc::clone(&leaf_schema))?;
        mid_schema.add_field("n", FieldType::Int)?;
        let mid_schema = Arc::new(mid_schema);
        let mut outer_schema = Schema::new();
        outer_schema.add_struct("mid", Arc::clone(&mid_schema))?;
        let outer_schema = Arc::new(outer_schema);

        let mut leaf = Record::new(leaf_schema);
        leaf.add_byte("x", 0x42)?;
        let mut mid = Record::new(mid_schema);
        mid.add_struct("leaf", leaf)?;
        mid.add_int("n", 7)?;
        let mut outer = Record::new(Arc::clone(&outer_schema));
        outer.add_struct("mid", mid)?;

        let mut processor = Processor::new();
        let bytes = processor.encode(&outer)?;
        let mut decoded = Record::new(outer_schema);
        processor.decode(&bytes, &mut decoded)?;
        assert_eq!(decoded, outer);

        let mid = decoded.first("mid").unwrap().as_struct()?;
        let leaf = mid.first("leaf").unwrap().as_struct()?;
        assert_eq!(leaf.first("x").unwrap().as_byte()?, 0x42);
        assert_eq!(mid.first("n").unwrap().as_int()?, 7);
        Ok(())
    }

    #[test]
    fn pre_encoded_bytes_under_a_struct_key_are_emitted_as_is() -> Result<()> {
        let inner_schema = single_field_schema("x", FieldType::Byte);
        let mut outer_schema = Schema::new();
        outer_schema.add_struct("inner", Arc::clone(&inner_schema))?;
        let outer_schema = Arc::new(outer_schema);

        let mut processor = Processor::new();
        let mut inner = Record::new(inner_schema);
        inner.add_byte("x", 0x7F)?;
        let inner_bytes = processor.encode(&inner)?;

        let mut outer = Record::new(Arc::clone(&outer_schema));
        outer.add_bytes("inner", &inner_bytes)?;
        let bytes = processor.encode(&outer)?;
        assert_eq!(bytes, vec![0x00, 0x00, 0x02, 0x00, 0x7F]);

        // The decoder still materializes a record.
        let mut decoded = Record::new(outer_schema);
        processor.decode(&bytes, &mut decoded)?;
        let nested = decoded.first("inner").unwrap().as_struct()?;
        assert_eq!(nested.first("x").unwrap().as_byte()?, 0x7F);
        Ok(())
    }

    #[test]
    fn write_stream_rewinds_to_marks() {
        let mut stream = WriteStream::new();
        stream.push_mark();
        stream.write(&[1, 2, 3]);

        stream.push_mark();
        stream.write(&[9, 9]);
        assert_eq!(stream.copy_from_last_mark(), vec![9, 9]);
        stream.rewind_to_last_mark();
        stream.pop_mark();

        stream.write(&[4]);
        assert_eq!(stream.copy_from_last_mark(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn write_stream_grows_from_a_small_initial_buffer() {
        let mut stream = WriteStream::with_capacity(8);
        let payload = (0..20u8).collect::<Vec<_>>();
        stream.push_mark();
        stream.write_byte(0xFE);
        stream.write(&payload);
        let mut expected = vec![0xFE];
        expected.extend_from_slice(&payload);
        assert_eq!(stream.copy_from_last_mark(), expected);
    }

    #[test]
    fn read_stream_scopes_remaining_to_the_active_layer() -> Result<()> {
        let mut stream = ReadStream::new();
        stream.push_bytes(&[1, 2, 3, 4]);
        assert_eq!(stream.remaining(), 4);
        assert_eq!(stream.read_byte()?, 1);
        assert_eq!(stream.read_byte()?, 2);

        stream.push_bytes(&[9, 8]);
        assert_eq!(stream.remaining(), 2);
        assert_eq!(stream.read_exact(2)?, vec![9, 8]);
        assert_eq!(stream.remaining(), 0);

        stream.pop_bytes();
        assert_eq!(stream.remaining(), 2);
        assert_eq!(stream.read_exact(2)?, vec![3, 4]);

        stream.pop_bytes();
        assert_eq!(stream.remaining(), 0);
        Ok(())
    }

    #[test]
    fn read_stream_bounds_reads_to_the_layer() {
        let mut stream = ReadStream::new();
        stream.push_bytes(&[1, 2]);
        assert_eq!(
            stream.read_exact(3),
            Err(Error::TruncatedInput { want: 3, have: 2 })
        );
    }
}
