use std::env;

use image::{DynamicImage, Luma};
use imageops_nd::{
    BinaryDilationFilter, Image, InterpolateImageFunction, InterpolationMethod, Interpolator,
    KernelFamily, KernelOperator, NdImage,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args.len() > 5 {
        eprintln!(
            "Usage: {} <input_image> <radius> <output_image> [nearest|linear]",
            args[0]
        );
        eprintln!("Example: {} input.png 2 output.png linear", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let radius: usize = args[2].parse().map_err(|_| "Invalid radius")?;
    let output_path = &args[3];
    let method: InterpolationMethod = args
        .get(4)
        .map_or(Ok(InterpolationMethod::Linear), |name| name.parse())?;

    // Binarize the input around mid-gray
    let gray = image::open(input_path)?.to_luma8();
    println!("Processing image: {}x{}", gray.width(), gray.height());
    let binary: Image<Luma<u8>> = Image::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([if gray.get_pixel(x, y).0[0] >= 128 { 255 } else { 0 }])
    });

    let element = KernelOperator::<u8, 2>::uniform(KernelFamily::Flat, [radius, radius])?;
    let dilated = BinaryDilationFilter::new(element, 0u8).apply(&NdImage::from_luma(&binary))?;

    // Sample the dilated image on a half-pixel grid to show sub-pixel evaluation
    let interp = Interpolator::new(method, &dilated)?;
    let [width, height] = [gray.width().saturating_sub(1), gray.height().saturating_sub(1)];
    let resampled: Image<Luma<u8>> = Image::from_fn(width.max(1), height.max(1), |x, y| {
        let value = interp
            .evaluate_at_continuous_index(&[f64::from(x) + 0.5, f64::from(y) + 0.5])
            .unwrap_or_else(|_| interp.sample(&[f64::from(x), f64::from(y)]));
        Luma([value.round().clamp(0.0, 255.0) as u8])
    });

    let foreground = dilated.pixels().iter().filter(|&&v| v > 0).count();
    println!(
        "Dilated with radius {} ({} foreground pixels), resampled with {} interpolation",
        radius, foreground, method
    );

    DynamicImage::ImageLuma8(resampled).save(output_path)?;
    println!("Saved to: {}", output_path);

    Ok(())
}
