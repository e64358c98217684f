#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use crate::image_pipeline::color_map::RgbImage;
    use crate::image_pipeline::common::error::{ConversionError, MapError, ParseError, Result};
    use crate::image_pipeline::conversions::{LutApplyPipeline, apply_lut};
    use crate::image_pipeline::lut::LutTable;
    use crate::image_pipeline::tiff::{
        ApplyConfig, ImageReader, ImageWriter, StandardTiffReader, StandardTiffWriter,
        TiffCompression,
    };

    /// 2-point LUT that inverts every channel.
    const INVERT_CUBE: &str = "TITLE \"Invert\"\n\
        LUT_3D_SIZE 2\n\
        1 1 1\n0 1 1\n1 0 1\n0 0 1\n\
        1 1 0\n0 1 0\n1 0 0\n0 0 0\n";

    struct MockReader {
        should_fail: bool,
        mock_data: Option<RgbImage>,
    }

    impl ImageReader for MockReader {
        fn read_image(&self, _data: &[u8]) -> Result<RgbImage> {
            if self.should_fail {
                return Err(ConversionError::DecodeError("Mock decode error".to_string()));
            }
            Ok(self.mock_data.clone().unwrap_or(RgbImage {
                width: 4,
                height: 2,
                data: (0..24).map(|v| (v * 10) as u8).collect(),
            }))
        }
    }

    struct MockWriter {
        should_fail: bool,
        written_data: std::sync::Arc<std::sync::Mutex<Vec<RgbImage>>>,
    }

    impl ImageWriter for MockWriter {
        fn write_image(&self, image: &RgbImage, _output: &mut dyn Write, _config: &ApplyConfig) -> Result<()> {
            if self.should_fail {
                return Err(ConversionError::EncodeError("Mock encode error".to_string()));
            }
            self.written_data.lock().unwrap().push(image.clone());
            Ok(())
        }
    }

    fn mock_pipeline(
        reader: MockReader,
        writer_fails: bool,
        config: ApplyConfig,
    ) -> (
        LutApplyPipeline<MockReader, MockWriter>,
        std::sync::Arc<std::sync::Mutex<Vec<RgbImage>>>,
    ) {
        let written = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let writer = MockWriter { should_fail: writer_fails, written_data: written.clone() };
        (LutApplyPipeline::with_custom(reader, writer, config).unwrap(), written)
    }

    #[test]
    fn test_config_builder() {
        let config = ApplyConfig::builder()
            .intensity(0.25)
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .validate_dimensions(false)
            .threads(Some(3))
            .build();

        assert_eq!(config.intensity, 0.25);
        assert_eq!(config.compression, TiffCompression::DeflateBest);
        assert_eq!(config.predictor, Some(2));
        assert!(!config.validate_dimensions);
        assert_eq!(config.threads, Some(3));
    }

    #[test]
    fn test_config_defaults() {
        let config = ApplyConfig::builder().build();

        assert_eq!(config.intensity, 1.0);
        assert_eq!(config.compression, TiffCompression::None);
        assert_eq!(config.predictor, None);
        assert!(config.validate_dimensions);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_successful_conversion() {
        let reader = MockReader { should_fail: false, mock_data: None };
        let (pipeline, written) = mock_pipeline(reader, false, ApplyConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(result.is_ok());
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let expected: Vec<u8> = (0..24).map(|v| 255 - (v * 10) as u8).collect();
        assert_eq!(written[0].data, expected);
    }

    #[test]
    fn test_reader_failure() {
        let reader = MockReader { should_fail: true, mock_data: None };
        let (pipeline, written) = mock_pipeline(reader, false, ApplyConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let reader = MockReader { should_fail: false, mock_data: None };
        let (pipeline, _written) = mock_pipeline(reader, true, ApplyConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
    }

    #[test]
    fn test_bad_lut_aborts_before_writing() {
        let reader = MockReader { should_fail: false, mock_data: None };
        let (pipeline, written) = mock_pipeline(reader, false, ApplyConfig::default());

        let seven_rows = "LUT_3D_SIZE 2\n0 0 0\n0 0 0\n0 0 0\n0 0 0\n0 0 0\n0 0 0\n0 0 0\n";
        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", seven_rows, &mut output);

        assert!(matches!(
            result.unwrap_err(),
            ConversionError::Parse(ParseError::SizeMismatch { declared: Some(2), rows: 7 })
        ));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_intensity_out_of_range_aborts() {
        let reader = MockReader { should_fail: false, mock_data: None };
        let config = ApplyConfig::builder().intensity(1.5).build();
        let (pipeline, written) = mock_pipeline(reader, false, config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(matches!(
            result.unwrap_err(),
            ConversionError::Map(MapError::IntensityOutOfRange(_))
        ));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dimension_validation_failure() {
        let reader = MockReader {
            should_fail: false,
            mock_data: Some(RgbImage::blank(0, 10).unwrap()),
        };
        let (pipeline, _written) = mock_pipeline(reader, false, ApplyConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(0, 10)));
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let reader = MockReader {
            should_fail: false,
            mock_data: Some(RgbImage::blank(0, 10).unwrap()),
        };
        let config = ApplyConfig::builder().validate_dimensions(false).build();
        let (pipeline, written) = mock_pipeline(reader, false, config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output);

        assert!(result.is_ok());
        assert_eq!(written.lock().unwrap()[0].width, 0);
    }

    #[test]
    fn test_apply_lut_entry_point() {
        let image = RgbImage::new(2, 1, vec![0, 128, 255, 10, 20, 30]).unwrap();

        let inverted = apply_lut(&image, INVERT_CUBE, 1.0).unwrap();
        assert_eq!(inverted.data, vec![255, 127, 0, 245, 235, 225]);

        let untouched = apply_lut(&image, INVERT_CUBE, 0.0).unwrap();
        assert_eq!(untouched, image);

        assert!(matches!(
            apply_lut(&image, "", 1.0),
            Err(ConversionError::Parse(ParseError::EmptyFile))
        ));
        assert!(matches!(
            apply_lut(&image, INVERT_CUBE, 1.5),
            Err(ConversionError::Map(MapError::IntensityOutOfRange(_)))
        ));
    }

    #[test]
    fn test_pipeline_apply_matches_entry_point() {
        let image = RgbImage::new(3, 1, vec![12, 34, 56, 78, 90, 123, 200, 150, 100]).unwrap();
        let lut = LutTable::parse(INVERT_CUBE).unwrap();
        let config = ApplyConfig::builder().intensity(0.4).threads(Some(2)).build();
        let pipeline = LutApplyPipeline::new(config).unwrap();

        let from_pipeline = pipeline.apply(&image, &lut).unwrap();
        let from_entry = apply_lut(&image, INVERT_CUBE, 0.4).unwrap();
        assert_eq!(from_pipeline, from_entry);
    }

    #[test]
    fn test_pipeline_pool_follows_config() {
        let reader = MockReader { should_fail: false, mock_data: None };
        let config = ApplyConfig::builder().threads(Some(2)).build();
        let (mut pipeline, written) = mock_pipeline(reader, false, config);
        assert_eq!(pipeline.worker_threads(), Some(2));

        for _ in 0..3 {
            let mut output = Cursor::new(Vec::new());
            pipeline.convert(b"fake tiff data", INVERT_CUBE, &mut output).unwrap();
            assert_eq!(pipeline.worker_threads(), Some(2));
        }
        assert_eq!(written.lock().unwrap().len(), 3);

        pipeline
            .set_config(ApplyConfig::builder().threads(Some(1)).intensity(0.5).build())
            .unwrap();
        assert_eq!(pipeline.worker_threads(), Some(1));
        assert_eq!(pipeline.config().intensity, 0.5);

        pipeline.set_config(ApplyConfig::default()).unwrap();
        assert_eq!(pipeline.worker_threads(), None);
    }

    #[test]
    fn test_tiff_round_trip() {
        let image = RgbImage::new(3, 2, (0..18).map(|v| (v * 14) as u8).collect()).unwrap();

        for compression in [
            TiffCompression::None,
            TiffCompression::Lzw,
            TiffCompression::DeflateBalanced,
        ] {
            let config = ApplyConfig::builder().compression(compression).build();
            let mut encoded = Vec::new();
            StandardTiffWriter.write_image(&image, &mut encoded, &config).unwrap();

            let decoded = StandardTiffReader.read_image(&encoded).unwrap();
            assert_eq!(decoded, image);
        }
    }

    #[test]
    fn test_tiff_reader_rejects_garbage() {
        let result = StandardTiffReader.read_image(b"definitely not a tiff");
        assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("input.tiff");
        let lut_path = dir.path().join("invert.cube");
        let output_path = dir.path().join("output.tiff");

        let image = RgbImage::new(2, 2, vec![0, 0, 0, 255, 255, 255, 100, 150, 200, 1, 2, 3]).unwrap();
        let mut encoded = Vec::new();
        StandardTiffWriter
            .write_image(&image, &mut encoded, &ApplyConfig::default())
            .unwrap();
        std::fs::write(&input_path, &encoded).unwrap();
        std::fs::write(&lut_path, INVERT_CUBE).unwrap();

        let config = ApplyConfig::builder().compression(TiffCompression::Lzw).build();
        let pipeline = LutApplyPipeline::new(config).unwrap();
        pipeline.convert_file(&input_path, &lut_path, &output_path).unwrap();

        let output = std::fs::read(&output_path).unwrap();
        let decoded = StandardTiffReader.read_image(&output).unwrap();
        assert_eq!(
            decoded.data,
            vec![255, 255, 255, 0, 0, 0, 155, 105, 55, 254, 253, 252]
        );
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let lut_path = dir.path().join("invert.cube");
        let output_path = dir.path().join("output.tiff");
        std::fs::write(&lut_path, INVERT_CUBE).unwrap();

        let pipeline = LutApplyPipeline::new(ApplyConfig::default()).unwrap();
        let result = pipeline.convert_file(dir.path().join("missing.tiff"), &lut_path, &output_path);

        assert!(matches!(result.unwrap_err(), ConversionError::InputReadError(_)));
        assert!(!output_path.exists());
    }
}
