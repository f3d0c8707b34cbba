mod cleanup_tests;
