#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use rastermill::{process_path, BatchProcessor, DefaultEngine, FileType, Loader, Recipe};

    #[test]
    fn test_process_file() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("test.png");

        let img = image::RgbImage::new(16, 16);
        img.save(input_path.path()).unwrap();

        let recipe = Recipe {
            width: Some(8),
            height: Some(8),
            ..Default::default()
        };

        let engine = DefaultEngine::new();
        let artifact = process_path(&engine, input_path.path(), &recipe).unwrap();

        assert_eq!((artifact.width, artifact.height), (8, 8));
        assert_eq!(artifact.file_name, ".jpg");

        let output_path = temp_dir.child("output.jpg");
        std::fs::write(output_path.path(), &artifact.bytes).unwrap();
        assert!(output_path.path().exists());
    }

    #[test]
    fn test_missing_file() {
        let engine = DefaultEngine::new();
        let result = process_path(
            &engine,
            std::path::Path::new("nonexistent.jpg"),
            &Recipe::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_rejects_empty_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let empty = temp_dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(Loader::new().load(&empty).is_err());
    }

    #[test]
    fn test_batch_directory() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.child("in");
        input_dir.create_dir_all().unwrap();
        let output_dir = temp_dir.child("out");

        for name in ["a.png", "b.png"] {
            let img = image::RgbImage::new(32, 16);
            img.save(input_dir.child(name).path()).unwrap();
        }
        // non-image files are skipped, not failed
        input_dir.child("notes.txt").write_str("not an image").unwrap();

        let recipe = Recipe {
            width: Some(8),
            height: Some(8),
            file_type: FileType::Png,
            ..Default::default()
        };

        let processor = BatchProcessor::new(recipe, 2).unwrap();
        let stats = processor
            .process_directory(input_dir.path(), output_dir.path(), false)
            .unwrap();

        assert_eq!(stats.processed_count, 2);
        assert!(stats.errors.is_empty());
        assert!(output_dir.child("a.png").path().exists());
        assert!(output_dir.child("b.png").path().exists());
    }

    #[test]
    fn test_batch_rejects_same_directory() {
        let temp_dir = TempDir::new().unwrap();
        let processor = BatchProcessor::new(Recipe::default(), 0).unwrap();
        let result = processor.process_directory(temp_dir.path(), temp_dir.path(), false);
        assert!(result.is_err());
    }
}
