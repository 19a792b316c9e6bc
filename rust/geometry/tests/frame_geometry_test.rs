// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use cabin_frame_geometry::{
    build_diagonal_beam, compute_levels, diagonal_pairing, generate_frame, BeamRole, ColumnLayout,
    CornerKey, Error, Face, FrameInput, FrameParameters, Point3, TubeSection,
};

fn analyze(params: &FrameParameters) {
    let frame = generate_frame(params).unwrap();
    let mesh = frame.combined_mesh().unwrap();
    let (min, max) = mesh.bounds();

    println!("\n=== {:?} / {} sections ===", params.layout, params.sections);
    println!("  Beams: {}", frame.beam_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Bounds: {:?} .. {:?}", min, max);
    for m in &frame.diagonals.measurements {
        println!("  Diagonal gap {} {:?}: {} mm", m.gap, m.face, m.length_mm());
    }
}

#[test]
fn test_every_level_has_all_corners() {
    for sections in 1..=6 {
        let params = FrameParameters::new(2.0, 2.0, 2.5, sections, ColumnLayout::Quad);
        let levels = compute_levels(&params).unwrap();
        assert_eq!(levels.len(), sections as usize);

        for level in &levels {
            for key in CornerKey::ALL {
                let p = level.get(key);
                assert_eq!(p.x.abs(), 1.0);
                assert_eq!(p.z.abs(), 1.0);
                assert_eq!(p.y, level.y);
            }
            let front = level.get(CornerKey::LeftFront).z;
            let back = level.get(CornerKey::LeftBack).z;
            assert_eq!(front - back, 2.0);
        }
    }
}

#[test]
fn test_default_cabin() {
    let params = FrameInput::default().to_parameters().unwrap();
    analyze(&params);

    let frame = generate_frame(&params).unwrap();
    assert_eq!(frame.horizontal.len(), 12);
    assert_eq!(frame.diagonals.len(), 8);

    // Every diagonal joins two different corners of adjacent levels
    for (beam, m) in frame.diagonals.beams.iter().zip(&frame.diagonals.measurements) {
        let BeamRole::Diagonal { gap, face } = beam.role else {
            panic!("unexpected role {:?}", beam.role);
        };
        assert_eq!((gap, face), (m.gap, m.face));

        let (lower, upper) = diagonal_pairing(face, gap);
        assert_ne!(lower, upper);

        let (start, end) = beam.endpoints();
        assert_abs_diff_eq!(start, m.start, epsilon = 1e-9);
        assert_abs_diff_eq!(end, m.end, epsilon = 1e-9);
        assert_relative_eq!(end.y - start.y, 2.5 / 4.0, epsilon = 1e-9);
    }

    // 2000 mm face, 625 mm rise
    let expected = (2.0_f64.powi(2) + 0.625_f64.powi(2)).sqrt();
    assert_eq!(frame.diagonals.max_length_mm(), Some((expected * 1000.0).round() as u32));
}

#[test]
fn test_zig_zag_alternates_on_every_face() {
    let params = FrameParameters::new(1.6, 1.4, 3.0, 5, ColumnLayout::Quad);
    let frame = generate_frame(&params).unwrap();

    for face in [Face::Right, Face::Left, Face::Front, Face::Back] {
        let braces: Vec<_> = frame
            .diagonals
            .measurements
            .iter()
            .filter(|m| m.face == face)
            .collect();
        assert_eq!(braces.len(), 4);

        for pair in braces.windows(2) {
            let a = pair[0].end - pair[0].start;
            let b = pair[1].end - pair[1].start;
            // Mirror images in the face plane: same rise, opposite run
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
            assert_relative_eq!(a.x, -b.x, epsilon = 1e-12);
            assert_relative_eq!(a.z, -b.z, epsilon = 1e-12);
            // Consecutive braces share the corner between them
            assert_abs_diff_eq!(pair[0].end, pair[1].start, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_pair_layout_frame() {
    let params = FrameParameters::new(2.0, 1.5, 2.4, 3, ColumnLayout::Pair)
        .with_column_position(0.1, 0.05);
    analyze(&params);

    let frame = generate_frame(&params).unwrap();
    assert_eq!(frame.horizontal.len(), 3);
    assert_eq!(frame.diagonals.len(), 2);

    for beam in frame.beams() {
        let (a, b) = beam.endpoints();
        assert_relative_eq!(a.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(b.x, 0.1, epsilon = 1e-12);
    }
    for beam in &frame.horizontal {
        assert_relative_eq!(beam.length, 1.5 - 0.1, epsilon = 1e-12);
    }
}

#[test]
fn test_small_configurations_are_empty_not_errors() {
    let one = FrameParameters::new(2.0, 2.0, 2.5, 1, ColumnLayout::Quad);
    let frame = generate_frame(&one).unwrap();
    assert_eq!(frame.horizontal.len(), 4);
    assert!(frame.diagonals.is_empty());

    let single = FrameParameters::new(2.0, 2.0, 2.5, 4, ColumnLayout::Single);
    let frame = generate_frame(&single).unwrap();
    assert!(frame.horizontal.is_empty());
    assert!(frame.diagonals.is_empty());

    let none = FrameParameters::new(2.0, 2.0, 2.5, 0, ColumnLayout::Quad);
    assert_eq!(generate_frame(&none).unwrap().beam_count(), 0);
}

#[test]
fn test_zero_length_diagonal_rejected() {
    let section = TubeSection::new(0.05, 0.03, 0.003175);
    let p = Point3::new(1.0, 1.0, 1.0);
    assert!(matches!(
        build_diagonal_beam(&p, &p, &section),
        Err(Error::DegenerateBeam(_))
    ));
}

#[test]
fn test_invalid_column_count_is_configuration_error() {
    let input = FrameInput::from_json(r#"{"columnCount": 3}"#).unwrap();
    assert_eq!(input.to_parameters(), Err(Error::InvalidColumnCount(3)));
}
