// Output format selection
//
// The output keeps the source format, under the unchanged key extension.
// The stored content type follows the output format.

use super::test_harness::*;
use image::ImageFormat;
use rstest::rstest;

#[rstest]
#[case::png(ImageFormat::Png, "photo.png", "image/png")]
#[case::jpeg(ImageFormat::Jpeg, "photo.jpg", "image/jpeg")]
#[case::gif(ImageFormat::Gif, "photo.gif", "image/gif")]
#[case::webp(ImageFormat::WebP, "photo.webp", "image/webp")]
#[case::bmp(ImageFormat::Bmp, "scans/page.bmp", "image/bmp")]
#[case::tiff(ImageFormat::Tiff, "scans/page.tiff", "image/tiff")]
#[tokio::test]
async fn test_source_format_is_preserved(
    #[case] format: ImageFormat,
    #[case] key: &str,
    #[case] content_type: &str,
) {
    let (handler, store) = setup();
    store.insert(SOURCE_BUCKET, key, encode_as(&gradient(480, 160), format));

    handler
        .handle_value(s3_event(SOURCE_BUCKET, key))
        .await
        .unwrap();

    let stored = store
        .object(DESTINATION_BUCKET, &format!("filtered-{}", key))
        .unwrap();
    assert_eq!(image::guess_format(&stored.body).unwrap(), format);
    assert_eq!(stored.content_type.as_deref(), Some(content_type));
}

#[tokio::test]
async fn test_lossless_formats_keep_untouched_pixels() {
    let source = gradient(480, 160);

    for (format, key) in [
        (ImageFormat::WebP, "photo.webp"),
        (ImageFormat::Bmp, "photo.bmp"),
        (ImageFormat::Tiff, "photo.tif"),
    ] {
        let (handler, store) = setup();
        store.insert(SOURCE_BUCKET, key, encode_as(&source, format));

        handler
            .handle_value(s3_event(SOURCE_BUCKET, key))
            .await
            .unwrap();

        let stored = store
            .object(DESTINATION_BUCKET, &format!("filtered-{}", key))
            .unwrap();
        let output = image::load_from_memory(&stored.body).unwrap().to_luma8();
        assert_eq!(output.dimensions(), (480, 160));

        // Top-left corner is away from the watermark
        let p = source.get_pixel(5, 5);
        assert_eq!(
            output.get_pixel(5, 5)[0],
            serverless_filter_bot::imaging::luminance(p[0], p[1], p[2]),
            "{:?}",
            format
        );
    }
}

#[tokio::test]
async fn test_content_sniffing_wins_over_extension() {
    let (handler, store) = setup();
    // JPEG bytes behind a .png key
    store.insert(
        SOURCE_BUCKET,
        "mislabelled.png",
        encode_as(&gradient(320, 120), ImageFormat::Jpeg),
    );

    handler
        .handle_value(s3_event(SOURCE_BUCKET, "mislabelled.png"))
        .await
        .unwrap();

    let stored = store
        .object(DESTINATION_BUCKET, "filtered-mislabelled.png")
        .unwrap();
    assert_eq!(image::guess_format(&stored.body).unwrap(), ImageFormat::Jpeg);
    assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn test_gif_output_stays_gray() {
    let (handler, store) = setup();
    store.insert(
        SOURCE_BUCKET,
        "anim.gif",
        encode_as(&gradient(300, 120), ImageFormat::Gif),
    );

    handler
        .handle_value(s3_event(SOURCE_BUCKET, "anim.gif"))
        .await
        .unwrap();

    let stored = store.object(DESTINATION_BUCKET, "filtered-anim.gif").unwrap();
    let output = image::load_from_memory(&stored.body).unwrap().to_rgb8();
    assert!(output.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
}
