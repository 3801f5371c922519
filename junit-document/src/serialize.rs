// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `Report`.

use crate::{
    AntAttributes, Property, Report, ReportLayout, RunTotals, SerializeError,
    TestCase, TestCaseAttributeOrder, TestCaseStatus, TestSuite,
};
use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    io::{self, Write},
    time::Duration,
};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static PROPERTIES_TAG: &str = "properties";
static PROPERTY_TAG: &str = "property";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";
static SYSTEM_OUT_TAG: &str = "system-out";
static SYSTEM_ERR_TAG: &str = "system-err";

static TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn serialize_report(
    report: &Report,
    writer: impl io::Write,
) -> Result<(), SerializeError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    serialize_report_impl(report, &mut writer)?;

    // Add a trailing newline.
    writer.into_inner().write_all(b"\n")?;
    Ok(())
}

fn serialize_report_impl(
    report: &Report,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let Report {
        name,
        layout,
        testcase_attribute_order,
        totals,
        testsuites,
    } = report;

    let mut testsuites_tag = BytesStart::new(TESTSUITES_TAG);
    match layout {
        ReportLayout::Standard => {
            let RunTotals {
                time,
                tests,
                failures,
                skipped,
            } = totals;
            testsuites_tag.push_attribute(("name", name.as_str()));
            testsuites_tag.push_attribute(("time", serialize_time(time).as_str()));
            testsuites_tag.push_attribute(("tests", tests.to_string().as_str()));
            testsuites_tag.push_attribute(("failures", failures.to_string().as_str()));
            if *skipped > 0 {
                testsuites_tag.push_attribute(("skipped", skipped.to_string().as_str()));
            }
        }
        // The Ant XSD doesn't allow attributes on the root element.
        ReportLayout::Ant => {}
    }

    if testsuites.is_empty() {
        return writer.write_event(Event::Empty(testsuites_tag));
    }

    writer.write_event(Event::Start(testsuites_tag))?;
    for testsuite in testsuites {
        serialize_testsuite(testsuite, *testcase_attribute_order, writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, writer)
}

fn serialize_testsuite(
    testsuite: &TestSuite,
    attribute_order: TestCaseAttributeOrder,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuite {
        name,
        timestamp,
        file,
        declared_tests: _,
        failures,
        skipped,
        time,
        properties,
        ant,
        testcases,
        system_out,
        system_err,
    } = testsuite;

    let mut testsuite_tag = BytesStart::new(TESTSUITE_TAG);
    testsuite_tag.push_attribute(("name", name.as_str()));
    if let Some(timestamp) = timestamp {
        testsuite_tag.push_attribute((
            "timestamp",
            timestamp.format(TIMESTAMP_FORMAT).to_string().as_str(),
        ));
    }
    testsuite_tag.push_attribute(("tests", testsuite.tests().to_string().as_str()));
    if let Some(file) = file {
        testsuite_tag.push_attribute(("file", file.as_str()));
    }
    if let Some(AntAttributes {
        package,
        hostname,
        id,
    }) = ant
    {
        testsuite_tag.push_attribute(("package", package.as_str()));
        testsuite_tag.push_attribute(("hostname", hostname.as_str()));
        testsuite_tag.push_attribute(("id", id.to_string().as_str()));
        // Failures and errors are not distinguished.
        testsuite_tag.push_attribute(("errors", "0"));
    }
    testsuite_tag.push_attribute(("failures", failures.to_string().as_str()));
    if *skipped > 0 {
        testsuite_tag.push_attribute(("skipped", skipped.to_string().as_str()));
    }
    testsuite_tag.push_attribute(("time", serialize_time(time).as_str()));

    let has_children = properties.is_some()
        || !testcases.is_empty()
        || system_out.is_some()
        || system_err.is_some();
    if !has_children {
        return writer.write_event(Event::Empty(testsuite_tag));
    }

    writer.write_event(Event::Start(testsuite_tag))?;

    if let Some(properties) = properties {
        serialize_properties(properties, writer)?;
    }

    for testcase in testcases {
        serialize_testcase(testcase, attribute_order, writer)?;
    }

    if let Some(system_out) = system_out {
        serialize_output(system_out, SYSTEM_OUT_TAG, writer)?;
    }
    if let Some(system_err) = system_err {
        serialize_output(system_err, SYSTEM_ERR_TAG, writer)?;
    }

    serialize_end_tag(TESTSUITE_TAG, writer)
}

fn serialize_properties(
    properties: &[Property],
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    if properties.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(PROPERTIES_TAG)));
    }

    serialize_empty_start_tag(PROPERTIES_TAG, writer)?;
    for property in properties {
        let mut property_tag = BytesStart::new(PROPERTY_TAG);
        property_tag.push_attribute(("name", property.name.as_str()));
        property_tag.push_attribute(("value", property.value.as_str()));
        writer.write_event(Event::Empty(property_tag))?;
    }
    serialize_end_tag(PROPERTIES_TAG, writer)
}

fn serialize_testcase(
    testcase: &TestCase,
    attribute_order: TestCaseAttributeOrder,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let TestCase {
        name,
        classname,
        time,
        status,
        system_out,
        system_err,
    } = testcase;

    let mut testcase_tag = BytesStart::new(TESTCASE_TAG);
    let time = serialize_time(time);
    match attribute_order {
        TestCaseAttributeOrder::NameFirst => {
            testcase_tag.push_attribute(("name", name.as_str()));
            testcase_tag.push_attribute(("time", time.as_str()));
            testcase_tag.push_attribute(("classname", classname.as_str()));
        }
        TestCaseAttributeOrder::ClassnameFirst => {
            testcase_tag.push_attribute(("classname", classname.as_str()));
            testcase_tag.push_attribute(("time", time.as_str()));
            testcase_tag.push_attribute(("name", name.as_str()));
        }
    }

    // Empty output is treated the same as no output.
    let system_out = system_out.as_deref().filter(|s| !s.is_empty());
    let system_err = system_err.as_deref().filter(|s| !s.is_empty());

    if matches!(status, TestCaseStatus::Success) && system_out.is_none() && system_err.is_none() {
        return writer.write_event(Event::Empty(testcase_tag));
    }

    writer.write_event(Event::Start(testcase_tag))?;

    if let Some(system_out) = system_out {
        serialize_output(system_out, SYSTEM_OUT_TAG, writer)?;
    }
    if let Some(system_err) = system_err {
        serialize_output(system_err, SYSTEM_ERR_TAG, writer)?;
    }

    match status {
        TestCaseStatus::Success => {}
        TestCaseStatus::Failure {
            message,
            ty,
            description,
        } => {
            let mut failure_tag = BytesStart::new(FAILURE_TAG);
            failure_tag.push_attribute(("message", message.as_str()));
            failure_tag.push_attribute(("type", ty.as_str()));
            if description.is_empty() {
                writer.write_event(Event::Empty(failure_tag))?;
            } else {
                writer.write_event(Event::Start(failure_tag))?;
                serialize_cdata(description, writer)?;
                serialize_end_tag(FAILURE_TAG, writer)?;
            }
        }
        TestCaseStatus::Skipped => {
            writer.write_event(Event::Empty(BytesStart::new(SKIPPED_TAG)))?;
        }
    }

    serialize_end_tag(TESTCASE_TAG, writer)
}

/// Writes `text` as one or more CDATA sections.
///
/// A CDATA section can't contain `]]>`, so the text is split between the `]]` and the `>` of
/// every occurrence, and each piece is written as its own section.
fn serialize_cdata(text: &str, writer: &mut Writer<impl io::Write>) -> quick_xml::Result<()> {
    let mut rest = text;
    while let Some(index) = rest.find("]]>") {
        let (head, tail) = rest.split_at(index + 2);
        writer.write_event(Event::CData(BytesCData::new(head)))?;
        rest = tail;
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))
}

fn serialize_output(
    output: &str,
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    if output.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(tag_name)));
    }

    serialize_empty_start_tag(tag_name, writer)?;
    writer.write_event(Event::Text(BytesText::new(output)))?;
    serialize_end_tag(tag_name, writer)
}

fn serialize_empty_start_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))
}

// Serialize time as seconds with 4 decimal points.
fn serialize_time(time: &Duration) -> String {
    format!("{:.4}", time.as_secs_f64())
}
