#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

pub const STUDENTS: &str = "\
student_id,name,gender,age,program,semester,enrollment_year,enrollment_status
S001,Alice Moreau,Female,20,Physics,3,2022,Active
S002,Omar Haddad,Male,22,Arts,5,2021,Active
";

pub const COURSES: &str = "\
course_id,course_name,department,semester_offered,max_capacity,enrolled_students_count,instructor_id
C101,Biology,Science,1,40,30,I01
C102,Chemistry,Science,2,80,70,I02
C201,Painting,Arts,1,25,20,I03
";

pub const FACULTY: &str = "\
instructor_id,name,department,average_student_feedback_score,graduation_success_rate,course_ids_taught
I01,Dr. Grace Lin,Science,4.5,0.92,\"C101,C102\"
I03,Prof. Tomas Ruiz,Arts,3.9,0.81,C201
";

pub const FEEDBACK: &str = "\
course_id,instructor_id,student_id,feedback_score,comments
C101,I01,S001,5,Clear lectures
C201,I03,S002,3,
";

pub const ENROLLMENT_TRENDS: &str = "\
year,program,total_enrolled,total_graduated
2021,Physics,100,20
2022,Physics,120,25
2023,Physics,150,30
2021,Arts,50,10
2022,Arts,55,12
2023,Arts,60,11
";

pub const GRADUATION_HEADER: &str = "student_id,name,gender,age,program,semester,enrollment_year,enrollment_status,graduation_year,gpa,category\n";

/// Two graduates in 2021, three in 2022, four in 2023
pub fn graduation_csv() -> String {
    let mut csv = GRADUATION_HEADER.to_string();
    let mut id = 0;
    for (year, graduates) in [(2021, 2), (2022, 3), (2023, 4)] {
        for _ in 0..graduates {
            id += 1;
            csv.push_str(&format!(
                "G{id:03},Graduate {id},Female,23,Physics,8,{},Graduated,{year},3.4,Honors\n",
                year - 4
            ));
        }
    }
    csv
}

/// A directory holding every table
pub fn seeded_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_table(dir.path(), "students", STUDENTS);
    write_table(dir.path(), "courses", COURSES);
    write_table(dir.path(), "faculty", FACULTY);
    write_table(dir.path(), "feedback", FEEDBACK);
    write_table(dir.path(), "enrollment_trends", ENROLLMENT_TRENDS);
    write_table(dir.path(), "graduation", &graduation_csv());
    dir
}

pub fn write_table(dir: &Path, table: &str, contents: &str) {
    fs::write(dir.join(format!("{table}.csv")), contents).unwrap();
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
