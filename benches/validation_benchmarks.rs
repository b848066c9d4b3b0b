use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use syllabus_schema::{RecordKind, SENTINEL, check_conventions, validate};

fn course_info(i: usize) -> Value {
    json!({
        "courseBasicInfo": {
            "courseTitle": format!("Course {}", i),
            "school": "NYU",
            "courseCode": format!("HIST-SHU-{}", 100 + i),
            "credits": "4",
            "semester": "Fall 2023",
            "department": "Humanities and History"
        },
        "instructorInfo": {
            "instructorName": "Instructor",
            "titlePosition": "Associate Professor",
            "officeAddress": "W810",
            "officeHours": "Tuesdays",
            "contactInfo": {"email": "instructor@nyu.edu", "phone": SENTINEL}
        },
        "assessmentAndGradingPolicy": {
            "weightings": {
                "assignments": "30%",
                "quizzes": SENTINEL,
                "midterm": "25%",
                "final": "30%",
                "projects": SENTINEL,
                "attendance": "15%"
            },
            "assessmentMethods": ["essays", "presentation", "participation"]
        }
    })
}

fn pitch(names: &[&str]) -> Value {
    let features: Vec<Value> = names
        .iter()
        .map(|name| json!({"name": name, "description": "How the feature helps in this course."}))
        .collect();
    json!({"title": "Pitch", "description": "One sentence.", "coreFeatures": features})
}

/// Generate a batch of page bundles with specific validation scenarios
fn generate_bundles(count: usize, scenario: &str) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let mut bundle = json!({
                "courseInfo": course_info(i),
                "productUsingInCourse": pitch(&["Explain Deeper", "Explain Easier", "Check Answer", "Visualization"]),
                "productUsingInCoursereading": pitch(&["Multi-Document Support", "Language Selection", "Automated Summaries", "Outline Recognition"]),
                "productUsingInCoursetranscribe": {
                    "title": "Transcribe",
                    "description": "One sentence.",
                    "coreFeatures": "- Transcripts.\n- Outlines.\n- Translation."
                },
                "FAQ": [
                    {"question": "Which formats?", "answer": "Most audio and video formats."},
                    {"question": "How accurate?", "answer": "Above 95% for clear audio."}
                ]
            });

            match scenario {
                "missing_fields" if i % 3 == 0 => {
                    if let Some(info) = bundle["courseInfo"].as_object_mut() {
                        info.shift_remove("instructorInfo");
                    }
                }
                "wrong_types" if i % 2 == 0 => {
                    bundle["courseInfo"]["assessmentAndGradingPolicy"]["assessmentMethods"] =
                        json!(["essays", 3, null]);
                    bundle["productUsingInCoursetranscribe"]["coreFeatures"] = json!(["a", "b"]);
                }
                _ => {}
            }
            bundle
        })
        .collect()
}

fn bench_validation_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_scenarios");

    for scenario in ["all_valid", "missing_fields", "wrong_types"] {
        let bundles = generate_bundles(100, scenario);
        group.throughput(Throughput::Elements(bundles.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(scenario), &bundles, |b, bundles| {
            b.iter(|| {
                for bundle in bundles {
                    black_box(validate(RecordKind::PageBundle, black_box(bundle)));
                }
            })
        });
    }

    group.finish();
}

fn bench_batch_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_scalability");

    for size in [10, 100, 1000] {
        let bundles = generate_bundles(size, "all_valid");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("bundles", size), &bundles, |b, bundles| {
            b.iter(|| {
                let invalid = bundles
                    .iter()
                    .filter(|bundle| !validate(RecordKind::PageBundle, bundle).ok)
                    .count();
                black_box(invalid)
            })
        });
    }

    group.finish();
}

fn bench_conventions(c: &mut Criterion) {
    let bundles = generate_bundles(100, "all_valid");

    c.bench_function("conventions_100_bundles", |b| {
        b.iter(|| {
            for bundle in &bundles {
                black_box(check_conventions(RecordKind::PageBundle, black_box(bundle)));
            }
        })
    });
}

criterion_group!(
    validation_benches,
    bench_validation_scenarios,
    bench_batch_scalability,
    bench_conventions
);

criterion_main!(validation_benches);
