mod summary_service_tests;
