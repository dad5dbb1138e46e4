#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm::pnm::PnmFormat;
use zenpnm::*;

const LAYOUTS: [PixelLayout; 9] = [
    PixelLayout::Gray8,
    PixelLayout::Gray16,
    PixelLayout::Rgb8,
    PixelLayout::Rgba8,
    PixelLayout::Bgr8,
    PixelLayout::Bgra8,
    PixelLayout::Bgrx8,
    PixelLayout::Rgb16,
    PixelLayout::Rgba16,
];

fuzz_target!(|data: &[u8]| {
    // [layout, width, height, pixels...]
    let [layout, width, height, pixels @ ..] = data else {
        return;
    };
    let layout = LAYOUTS[*layout as usize % LAYOUTS.len()];
    let (w, h) = (u32::from(*width % 64), u32::from(*height % 64));
    let Ok(image) = RawImage::new(pixels, w, h, layout) else {
        return;
    };

    for format in [PnmFormat::Pbm, PnmFormat::Pgm, PnmFormat::Ppm] {
        let request = EncodeRequest::pnm(format);
        let mut streamed = Vec::new();
        request
            .encode(&mut streamed, &image, enough::Unstoppable)
            .expect("encoding into a Vec must not fail");
        let buffered = request
            .encode_to_vec(&image, enough::Unstoppable)
            .expect("encoding into a Vec must not fail");

        assert_eq!(streamed, buffered, "streamed and buffered output differ");
        assert_eq!(streamed.len(), request.encoded_len(&image).unwrap());

        let maxval = request.maxval_for(&image);
        let raster = streamed.len() - pnm::header(format, w, h, maxval).len();
        let expected = match format {
            PnmFormat::Pbm => h as usize * (w as usize).div_ceil(8),
            _ => (w * h) as usize * format.channels() * maxval.bytes_per_sample(),
        };
        assert_eq!(raster, expected, "raster length for {format:?}");
    }
});
