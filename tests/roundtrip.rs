//! End-to-end compression properties: round-trip identity, determinism, run
//! boundaries, degenerate images, worst-case expansion.

use parle::{
    partition_count, CompressedStream, Parle, ParleError, PixelBuffer, PixelFormat,
    ProgressTracker, Result, STREAM_HEADER_SIZE,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Horizontally banded RGB image: long runs within each band, seams every 8 rows.
fn banded_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let band = y / 8;
        let r = (band * 37 % 256) as u8;
        let g = (band * 59 % 256) as u8;
        let b = (band * 91 % 256) as u8;
        for _ in 0..width {
            data.extend_from_slice(&[r, g, b]);
        }
    }
    data
}

// --- ROUND-TRIP IDENTITY ---

#[test]
fn round_trip_identity_across_worker_counts() -> Result<()> {
    init_logs();
    let pixels = banded_rgb(64, 50);
    let image = PixelBuffer::new(64, 50, PixelFormat::Rgb, &pixels)?;

    for workers in [1, 2, 3, 8] {
        let stream = Parle::compress(&image, workers)?;
        let decoded = Parle::decompress(&stream)?;
        assert_eq!(decoded, pixels, "round-trip failed with {workers} workers");
        assert!(Parle::verify(&image, &stream));
    }
    Ok(())
}

#[test]
fn partition_seams_do_not_change_decoded_pixels() -> Result<()> {
    // Height 7 with 3 workers puts seams mid-band, forcing run boundaries that the
    // single-worker stream does not have. The decoded pixels must still match.
    let pixels = banded_rgb(33, 7);
    let image = PixelBuffer::new(33, 7, PixelFormat::Rgb, &pixels)?;

    let solo = Parle::compress(&image, 1)?;
    let split = Parle::compress(&image, 3)?;

    assert_eq!(Parle::decompress(&solo)?, Parle::decompress(&split)?);
    Ok(())
}

#[test]
fn grayscale_round_trip() -> Result<()> {
    let width = 40u32;
    let height = 30u32;
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| std::iter::repeat((y * 9 % 256) as u8).take(width as usize))
        .collect();
    let image = PixelBuffer::new(width, height, PixelFormat::Gray, &pixels)?;

    let stream = Parle::compress(&image, 4)?;
    assert_eq!(Parle::decompress(&stream)?, pixels);
    Ok(())
}

// --- DETERMINISM ---

#[test]
fn repeated_compression_is_byte_identical() -> Result<()> {
    let pixels = banded_rgb(128, 96);
    let image = PixelBuffer::new(128, 96, PixelFormat::Rgb, &pixels)?;

    for workers in [1, 4] {
        let a = Parle::compress(&image, workers)?;
        let b = Parle::compress(&image, workers)?;
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
    Ok(())
}

// --- RUN LENGTH BOUNDARIES ---

#[test]
fn run_of_255_encodes_as_one_record() -> Result<()> {
    let pixels = vec![7u8; 255 * 3];
    let image = PixelBuffer::new(255, 1, PixelFormat::Rgb, &pixels)?;

    let stream = Parle::compress(&image, 1)?;
    assert_eq!(stream.payload(), &[255u8, 7, 7, 7][..]);
    Ok(())
}

#[test]
fn run_of_256_splits_into_255_plus_1() -> Result<()> {
    let pixels = vec![7u8; 256 * 3];
    let image = PixelBuffer::new(256, 1, PixelFormat::Rgb, &pixels)?;

    let stream = Parle::compress(&image, 1)?;
    assert_eq!(stream.payload(), &[255u8, 7, 7, 7, 1, 7, 7, 7][..]);
    Ok(())
}

// --- DEGENERATE IMAGES ---

#[test]
fn empty_images_produce_header_only_streams() -> Result<()> {
    for (w, h) in [(0u32, 50u32), (50, 0), (0, 0)] {
        let image = PixelBuffer::new(w, h, PixelFormat::Rgb, &[])?;
        let stream = Parle::compress(&image, 8)?;
        assert_eq!(stream.as_bytes().len(), STREAM_HEADER_SIZE);
        assert_eq!(Parle::decompress(&stream)?, Vec::<u8>::new());
    }
    Ok(())
}

#[test]
fn more_workers_than_rows_is_clamped() -> Result<()> {
    let pixels = banded_rgb(16, 3);
    let image = PixelBuffer::new(16, 3, PixelFormat::Rgb, &pixels)?;

    let (_, report) = Parle::compress_with_report(&image, 64)?;
    assert_eq!(report.workers.len(), 3);
    Ok(())
}

// --- COMPRESSION RATIOS ---

#[test]
fn single_color_image_compresses_to_forty_runs() -> Result<()> {
    let pixels = vec![0u8; 100 * 100 * 3];
    let image = PixelBuffer::new(100, 100, PixelFormat::Rgb, &pixels)?;

    let (stream, report) = Parle::compress_with_report(&image, 1)?;
    // ceil(10000 / 255) = 40 runs of 4 bytes.
    assert_eq!(report.total_runs(), 40);
    assert_eq!(stream.payload().len(), 160);
    assert_eq!(stream.as_bytes().len(), 160 + STREAM_HEADER_SIZE);
    assert!(Parle::verify(&image, &stream));
    Ok(())
}

#[test]
fn all_distinct_pixels_expand_without_truncation() -> Result<()> {
    // Every pixel differs from its predecessor: one 4-byte record per 3-byte pixel.
    let count = 1024usize;
    let pixels: Vec<u8> = (0..count)
        .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0])
        .collect();
    let image = PixelBuffer::new(count as u32, 1, PixelFormat::Rgb, &pixels)?;

    let stream = Parle::compress(&image, 1)?;
    assert_eq!(stream.payload().len(), count * 4);
    assert_eq!(Parle::decompress(&stream)?, pixels);
    Ok(())
}

// --- RECOVERABLE DECODE ---

#[test]
fn truncated_payload_is_a_short_decode_not_a_crash() -> Result<()> {
    let pixels = banded_rgb(32, 32);
    let image = PixelBuffer::new(32, 32, PixelFormat::Rgb, &pixels)?;
    let stream = Parle::compress(&image, 2)?;

    // Chop mid-record: the header survives, the tail is gone.
    let mut bytes = stream.as_bytes().to_vec();
    bytes.truncate(bytes.len() / 2 + 1);
    let truncated = CompressedStream::from_bytes(bytes, PixelFormat::Rgb)?;

    let partial = truncated.decode_pixels();
    assert!(partial.len() < pixels.len());
    assert_eq!(&pixels[..partial.len()], &partial[..]);

    assert!(matches!(
        Parle::decompress(&truncated),
        Err(ParleError::Format(_))
    ));
    assert!(!Parle::verify(&image, &truncated));
    Ok(())
}

// --- PROGRESS TRACKING ---

#[test]
fn progress_totals_match_job_totals() -> Result<()> {
    let pixels = banded_rgb(80, 60);
    let image = PixelBuffer::new(80, 60, PixelFormat::Rgb, &pixels)?;

    let workers = partition_count(60, 4);
    let tracker = ProgressTracker::new(workers);
    let (stream, report) = Parle::compress_tracked(&image, 4, &tracker)?;

    assert_eq!(tracker.total_pixels_done(), image.pixel_count());
    assert_eq!(tracker.total_bytes_done(), stream.payload().len());
    assert_eq!(tracker.total_runs_done(), report.total_runs());

    let per_worker_bytes: usize = report.workers.iter().map(|w| w.bytes_out).sum();
    assert_eq!(per_worker_bytes, stream.payload().len());
    Ok(())
}
